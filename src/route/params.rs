//! Route parameters: the loose caller-facing map and the per-route records

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Field, RouteName};
use crate::error::{self, RouteError};

/// A non-empty parameter value, inserted into the path verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamValue(String);

impl ParamValue {
    /// Wrap a value, rejecting the empty string
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!value.is_empty()).then_some(Self(value))
    }

    /// Borrow the value
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named parameters supplied by a caller for one navigation decision
///
/// Every field is optional here; each route checks its own required subset
/// when a [`super::Route`] is built from the map. Empty strings count as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteParameters {
    /// Space (owner namespace) name
    pub space_name: Option<String>,
    /// Full repository path, `space/repo`
    pub repository_path: Option<String>,
    /// Branch, tag or commit
    pub git_reference: Option<String>,
    /// File or directory path inside the repository
    pub resource_path: Option<String>,
    /// Reference the commit history starts from
    pub commit_reference: Option<String>,
    /// Branch name
    pub branch_name: Option<String>,
    /// `base...head` reference pair
    pub diff_reference_pair: Option<String>,
    /// Pull request number
    pub pull_request_id: Option<String>,
    /// Tab of the pull request page
    pub pull_request_section: Option<String>,
    /// Webhook identifier
    pub webhook_id: Option<String>,
}

impl RouteParameters {
    /// Empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Set or clear a field
    pub fn set(&mut self, field: Field, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Value of a field, `None` when absent or empty
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Fields that carry a value
    pub fn present_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
    }

    pub(crate) fn require(&self, route: RouteName, field: Field) -> error::Result<ParamValue> {
        self.optional(field)
            .ok_or(RouteError::MissingRequiredParameter { route, field })
    }

    pub(crate) fn optional(&self, field: Field) -> Option<ParamValue> {
        self.get(field).and_then(ParamValue::new)
    }

    const fn slot(&self, field: Field) -> Option<&String> {
        match field {
            Field::SpaceName => self.space_name.as_ref(),
            Field::RepositoryPath => self.repository_path.as_ref(),
            Field::GitReference => self.git_reference.as_ref(),
            Field::ResourcePath => self.resource_path.as_ref(),
            Field::CommitReference => self.commit_reference.as_ref(),
            Field::BranchName => self.branch_name.as_ref(),
            Field::DiffReferencePair => self.diff_reference_pair.as_ref(),
            Field::PullRequestId => self.pull_request_id.as_ref(),
            Field::PullRequestSection => self.pull_request_section.as_ref(),
            Field::WebhookId => self.webhook_id.as_ref(),
        }
    }

    const fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::SpaceName => &mut self.space_name,
            Field::RepositoryPath => &mut self.repository_path,
            Field::GitReference => &mut self.git_reference,
            Field::ResourcePath => &mut self.resource_path,
            Field::CommitReference => &mut self.commit_reference,
            Field::BranchName => &mut self.branch_name,
            Field::DiffReferencePair => &mut self.diff_reference_pair,
            Field::PullRequestId => &mut self.pull_request_id,
            Field::PullRequestSection => &mut self.pull_request_section,
            Field::WebhookId => &mut self.webhook_id,
        }
    }
}

/// Parameters of the repository list of a space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryList {
    /// Space name
    pub space_name: ParamValue,
}

/// Parameters of every page addressed by the repository path alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    /// Repository path
    pub repository_path: ParamValue,
}

/// Parameters of the repository content browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryView {
    /// Repository path
    pub repository_path: ParamValue,
    /// Reference to browse, defaults to the repository's default branch
    pub git_reference: Option<ParamValue>,
    /// File or directory to open
    pub resource_path: Option<ParamValue>,
}

/// Parameters of the file editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEdit {
    /// Repository path
    pub repository_path: ParamValue,
    /// Reference the edit is based on
    pub git_reference: ParamValue,
    /// File being edited
    pub resource_path: ParamValue,
}

/// Parameters of the commit history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitList {
    /// Repository path
    pub repository_path: ParamValue,
    /// Reference the history starts from
    pub commit_reference: ParamValue,
}

/// Parameters of a single pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDetail {
    /// Repository path
    pub repository_path: ParamValue,
    /// Pull request number
    pub pull_request_id: ParamValue,
    /// Tab to open, e.g. `files-changed`
    pub pull_request_section: Option<ParamValue>,
}

/// Parameters of a reference comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compare {
    /// Repository path
    pub repository_path: ParamValue,
    /// `base...head` reference pair
    pub diff_reference_pair: ParamValue,
}

/// Parameters of a single webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookDetail {
    /// Repository path
    pub repository_path: ParamValue,
    /// Webhook identifier
    pub webhook_id: ParamValue,
}

//! Route names, parameters and path resolution

mod field;
mod params;
pub mod pattern;
mod resolve;

pub use field::{Field, PlaceholderKind};
pub use params::{
    CommitList, Compare, FileEdit, ParamValue, PullRequestDetail, RepositoryList,
    RepositoryTarget, RepositoryView, RouteParameters, WebhookDetail,
};
pub use resolve::{ResolvedPath, Resolver, Route, resolve};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;

/// Navigation destinations of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteName {
    /// Login page
    SignIn,
    /// Registration page
    SignUp,
    /// Repositories of a space
    RepositoryList,
    /// Repository content browser
    RepositoryView,
    /// File editor
    FileEdit,
    /// Commit history
    CommitList,
    /// Pull requests of a repository
    PullRequestList,
    /// Single pull request
    PullRequestDetail,
    /// Comparison between two references
    Compare,
    /// Branches of a repository
    BranchList,
    /// Repository settings
    Settings,
    /// Webhooks of a repository
    WebhookList,
    /// New webhook form
    WebhookCreate,
    /// Single webhook
    WebhookDetail,
    /// New webhook form reached from the settings page
    SettingsWebhookCreate,
}

impl RouteName {
    /// Every route, in table order
    pub const ALL: [Self; 15] = [
        Self::SignIn,
        Self::SignUp,
        Self::RepositoryList,
        Self::RepositoryView,
        Self::FileEdit,
        Self::CommitList,
        Self::PullRequestList,
        Self::PullRequestDetail,
        Self::Compare,
        Self::BranchList,
        Self::Settings,
        Self::WebhookList,
        Self::WebhookCreate,
        Self::WebhookDetail,
        Self::SettingsWebhookCreate,
    ];

    /// Textual name, as accepted by [`FromStr`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "sign-in",
            Self::SignUp => "sign-up",
            Self::RepositoryList => "repository-list",
            Self::RepositoryView => "repository-view",
            Self::FileEdit => "file-edit",
            Self::CommitList => "commit-list",
            Self::PullRequestList => "pull-request-list",
            Self::PullRequestDetail => "pull-request-detail",
            Self::Compare => "compare",
            Self::BranchList => "branch-list",
            Self::Settings => "settings",
            Self::WebhookList => "webhook-list",
            Self::WebhookCreate => "webhook-create",
            Self::WebhookDetail => "webhook-detail",
            Self::SettingsWebhookCreate => "settings-webhook-create",
        }
    }

    /// Fields that must be present, in the order they appear in the path
    #[must_use]
    pub const fn required_fields(self) -> &'static [Field] {
        match self {
            Self::SignIn | Self::SignUp => &[],
            Self::RepositoryList => &[Field::SpaceName],
            Self::RepositoryView
            | Self::PullRequestList
            | Self::BranchList
            | Self::Settings
            | Self::WebhookList
            | Self::WebhookCreate
            | Self::SettingsWebhookCreate => &[Field::RepositoryPath],
            Self::FileEdit => &[
                Field::RepositoryPath,
                Field::GitReference,
                Field::ResourcePath,
            ],
            Self::CommitList => &[Field::RepositoryPath, Field::CommitReference],
            Self::PullRequestDetail => &[Field::RepositoryPath, Field::PullRequestId],
            Self::Compare => &[Field::RepositoryPath, Field::DiffReferencePair],
            Self::WebhookDetail => &[Field::RepositoryPath, Field::WebhookId],
        }
    }

    /// Fields appended only when present; each one independently
    #[must_use]
    pub const fn optional_fields(self) -> &'static [Field] {
        match self {
            Self::RepositoryView => &[Field::GitReference, Field::ResourcePath],
            Self::PullRequestDetail => &[Field::PullRequestSection],
            _ => &[],
        }
    }

    /// Required fields followed by optional fields
    pub fn fields(self) -> impl Iterator<Item = Field> {
        self.required_fields()
            .iter()
            .chain(self.optional_fields())
            .copied()
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteName {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|route| route.as_str() == s)
            .ok_or_else(|| RouteError::UnknownRoute(s.to_string()))
    }
}

//! Parameter field vocabulary shared by the resolver and the pattern table

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named route parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Space (owner namespace) name
    SpaceName,
    /// Full repository path, `space/repo`
    RepositoryPath,
    /// Branch, tag or commit the view is pinned to
    GitReference,
    /// File or directory path inside the repository
    ResourcePath,
    /// Reference the commit history starts from
    CommitReference,
    /// Branch name
    BranchName,
    /// `base...head` reference pair for a comparison
    DiffReferencePair,
    /// Pull request number
    PullRequestId,
    /// Tab of the pull request page
    PullRequestSection,
    /// Webhook identifier
    WebhookId,
}

/// How a placeholder consumes the inbound path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Matches exactly one path segment
    Segment,
    /// Matches the remainder of the path, slashes included
    Greedy,
}

impl PlaceholderKind {
    /// Suffix written after the placeholder name
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Segment => "",
            Self::Greedy => "*",
        }
    }
}

impl Field {
    /// Every field, in declaration order
    pub const ALL: [Self; 10] = [
        Self::SpaceName,
        Self::RepositoryPath,
        Self::GitReference,
        Self::ResourcePath,
        Self::CommitReference,
        Self::BranchName,
        Self::DiffReferencePair,
        Self::PullRequestId,
        Self::PullRequestSection,
        Self::WebhookId,
    ];

    /// Name used in parameter maps and placeholders
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SpaceName => "spaceName",
            Self::RepositoryPath => "repositoryPath",
            Self::GitReference => "gitReference",
            Self::ResourcePath => "resourcePath",
            Self::CommitReference => "commitReference",
            Self::BranchName => "branchName",
            Self::DiffReferencePair => "diffReferencePair",
            Self::PullRequestId => "pullRequestId",
            Self::PullRequestSection => "pullRequestSection",
            Self::WebhookId => "webhookId",
        }
    }

    /// Look up a field by its name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Placeholder kind the matcher uses for this field
    ///
    /// Values that may contain `/` (repository paths, git references, file
    /// paths) are greedy.
    #[must_use]
    pub const fn placeholder_kind(self) -> PlaceholderKind {
        match self {
            Self::SpaceName | Self::PullRequestId | Self::WebhookId => PlaceholderKind::Segment,
            Self::RepositoryPath
            | Self::GitReference
            | Self::ResourcePath
            | Self::CommitReference
            | Self::BranchName
            | Self::DiffReferencePair
            | Self::PullRequestSection => PlaceholderKind::Greedy,
        }
    }

    /// Placeholder token, e.g. `:webhookId` or `:resourcePath*`
    #[must_use]
    pub fn placeholder(self) -> String {
        format!(":{}{}", self.name(), self.placeholder_kind().marker())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

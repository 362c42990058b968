//! Path resolution

use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::params::{
    CommitList, Compare, FileEdit, PullRequestDetail, RepositoryList, RepositoryTarget,
    RepositoryView, RouteParameters, WebhookDetail,
};
use super::{Field, RouteName};
use crate::config::Config;
use crate::error::Result;

/// A concrete URL path, always starting with `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResolvedPath(String);

impl ResolvedPath {
    /// Borrow the path
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Take ownership of the path
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ResolvedPath> for String {
    fn from(path: ResolvedPath) -> Self {
        path.0
    }
}

/// A navigation destination together with the parameters it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/signin`
    SignIn,
    /// `/signup`
    SignUp,
    /// `/{spaceName}`
    RepositoryList(RepositoryList),
    /// `/{repositoryPath}[//{gitReference}][/~/{resourcePath}]`
    RepositoryView(RepositoryView),
    /// `/{repositoryPath}/edit/{gitReference}/~/{resourcePath}`
    FileEdit(FileEdit),
    /// `/{repositoryPath}/commits/{commitReference}`
    CommitList(CommitList),
    /// `/{repositoryPath}/pulls`
    PullRequestList(RepositoryTarget),
    /// `/{repositoryPath}/pulls/{pullRequestId}[/{pullRequestSection}]`
    PullRequestDetail(PullRequestDetail),
    /// `/{repositoryPath}/pulls/compare/{diffReferencePair}`
    Compare(Compare),
    /// `/{repositoryPath}/branches`
    BranchList(RepositoryTarget),
    /// `/{repositoryPath}/settings`
    Settings(RepositoryTarget),
    /// `/{repositoryPath}/webhooks`
    WebhookList(RepositoryTarget),
    /// `/{repositoryPath}/webhooks/new`
    WebhookCreate(RepositoryTarget),
    /// `/{repositoryPath}/webhook/{webhookId}`
    WebhookDetail(WebhookDetail),
    /// `/{repositoryPath}/settings/webhook/new`
    SettingsWebhookCreate(RepositoryTarget),
}

impl Route {
    /// Build a typed route from a loose parameter map
    ///
    /// Fields the route does not read are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RouteError::MissingRequiredParameter`] for the first
    /// required field, in path order, that is absent or empty.
    pub fn from_parameters(name: RouteName, params: &RouteParameters) -> Result<Self> {
        let repository = || -> Result<RepositoryTarget> {
            Ok(RepositoryTarget {
                repository_path: params.require(name, Field::RepositoryPath)?,
            })
        };

        let route = match name {
            RouteName::SignIn => Self::SignIn,
            RouteName::SignUp => Self::SignUp,
            RouteName::RepositoryList => Self::RepositoryList(RepositoryList {
                space_name: params.require(name, Field::SpaceName)?,
            }),
            RouteName::RepositoryView => Self::RepositoryView(RepositoryView {
                repository_path: params.require(name, Field::RepositoryPath)?,
                git_reference: params.optional(Field::GitReference),
                resource_path: params.optional(Field::ResourcePath),
            }),
            RouteName::FileEdit => Self::FileEdit(FileEdit {
                repository_path: params.require(name, Field::RepositoryPath)?,
                git_reference: params.require(name, Field::GitReference)?,
                resource_path: params.require(name, Field::ResourcePath)?,
            }),
            RouteName::CommitList => Self::CommitList(CommitList {
                repository_path: params.require(name, Field::RepositoryPath)?,
                commit_reference: params.require(name, Field::CommitReference)?,
            }),
            RouteName::PullRequestList => Self::PullRequestList(repository()?),
            RouteName::PullRequestDetail => Self::PullRequestDetail(PullRequestDetail {
                repository_path: params.require(name, Field::RepositoryPath)?,
                pull_request_id: params.require(name, Field::PullRequestId)?,
                pull_request_section: params.optional(Field::PullRequestSection),
            }),
            RouteName::Compare => Self::Compare(Compare {
                repository_path: params.require(name, Field::RepositoryPath)?,
                diff_reference_pair: params.require(name, Field::DiffReferencePair)?,
            }),
            RouteName::BranchList => Self::BranchList(repository()?),
            RouteName::Settings => Self::Settings(repository()?),
            RouteName::WebhookList => Self::WebhookList(repository()?),
            RouteName::WebhookCreate => Self::WebhookCreate(repository()?),
            RouteName::WebhookDetail => Self::WebhookDetail(WebhookDetail {
                repository_path: params.require(name, Field::RepositoryPath)?,
                webhook_id: params.require(name, Field::WebhookId)?,
            }),
            RouteName::SettingsWebhookCreate => Self::SettingsWebhookCreate(repository()?),
        };

        Ok(route)
    }

    /// The destination this route addresses
    #[must_use]
    pub const fn name(&self) -> RouteName {
        match self {
            Self::SignIn => RouteName::SignIn,
            Self::SignUp => RouteName::SignUp,
            Self::RepositoryList(_) => RouteName::RepositoryList,
            Self::RepositoryView(_) => RouteName::RepositoryView,
            Self::FileEdit(_) => RouteName::FileEdit,
            Self::CommitList(_) => RouteName::CommitList,
            Self::PullRequestList(_) => RouteName::PullRequestList,
            Self::PullRequestDetail(_) => RouteName::PullRequestDetail,
            Self::Compare(_) => RouteName::Compare,
            Self::BranchList(_) => RouteName::BranchList,
            Self::Settings(_) => RouteName::Settings,
            Self::WebhookList(_) => RouteName::WebhookList,
            Self::WebhookCreate(_) => RouteName::WebhookCreate,
            Self::WebhookDetail(_) => RouteName::WebhookDetail,
            Self::SettingsWebhookCreate(_) => RouteName::SettingsWebhookCreate,
        }
    }

    /// Render the path, relative to the application root
    #[must_use]
    pub fn to_path(&self) -> ResolvedPath {
        let path = match self {
            Self::SignIn => "/signin".to_string(),
            Self::SignUp => "/signup".to_string(),
            Self::RepositoryList(p) => format!("/{}", p.space_name),
            Self::RepositoryView(p) => {
                let mut path = format!("/{}", p.repository_path);
                if let Some(git_reference) = &p.git_reference {
                    path.push_str("//");
                    path.push_str(git_reference.as_str());
                }
                if let Some(resource_path) = &p.resource_path {
                    path.push_str("/~/");
                    path.push_str(resource_path.as_str());
                }
                path
            }
            Self::FileEdit(p) => format!(
                "/{}/edit/{}/~/{}",
                p.repository_path, p.git_reference, p.resource_path
            ),
            Self::CommitList(p) => {
                format!("/{}/commits/{}", p.repository_path, p.commit_reference)
            }
            Self::PullRequestList(p) => format!("/{}/pulls", p.repository_path),
            Self::PullRequestDetail(p) => {
                let mut path = format!("/{}/pulls/{}", p.repository_path, p.pull_request_id);
                if let Some(section) = &p.pull_request_section {
                    path.push('/');
                    path.push_str(section.as_str());
                }
                path
            }
            Self::Compare(p) => format!(
                "/{}/pulls/compare/{}",
                p.repository_path, p.diff_reference_pair
            ),
            Self::BranchList(p) => format!("/{}/branches", p.repository_path),
            Self::Settings(p) => format!("/{}/settings", p.repository_path),
            Self::WebhookList(p) => format!("/{}/webhooks", p.repository_path),
            Self::WebhookCreate(p) => format!("/{}/webhooks/new", p.repository_path),
            Self::WebhookDetail(p) => {
                format!("/{}/webhook/{}", p.repository_path, p.webhook_id)
            }
            Self::SettingsWebhookCreate(p) => {
                format!("/{}/settings/webhook/new", p.repository_path)
            }
        };
        ResolvedPath(path)
    }
}

/// Resolves routes beneath a configured mount prefix
///
/// Holds no mutable state; build one per configuration and share it freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolver {
    base_path: String,
}

impl Resolver {
    /// Create a resolver from configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            base_path: config.normalized_base_path(),
        }
    }

    /// Mount prefix prepended to every path, empty at the root
    #[must_use]
    pub const fn base_path(&self) -> &str {
        self.base_path.as_str()
    }

    /// Resolve a route name and parameter map into a path
    ///
    /// # Errors
    ///
    /// Returns [`crate::RouteError::MissingRequiredParameter`] when a field
    /// the route requires is absent or empty.
    pub fn resolve(&self, name: RouteName, params: &RouteParameters) -> Result<ResolvedPath> {
        let route = Route::from_parameters(name, params)?;
        Ok(self.resolve_route(&route))
    }

    /// Resolve an already validated route
    #[must_use]
    pub fn resolve_route(&self, route: &Route) -> ResolvedPath {
        let relative = route.to_path();
        let path = if self.base_path.is_empty() {
            relative
        } else {
            ResolvedPath(format!("{}{}", self.base_path, relative))
        };
        debug!(route = %route.name(), path = %path, "Resolved route");
        path
    }
}

/// Resolve against the application root
///
/// # Errors
///
/// Returns [`crate::RouteError::MissingRequiredParameter`] when a field the
/// route requires is absent or empty.
pub fn resolve(name: RouteName, params: &RouteParameters) -> Result<ResolvedPath> {
    Resolver::default().resolve(name, params)
}

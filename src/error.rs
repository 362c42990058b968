//! Error types for route resolution and the pattern table

use thiserror::Error;

use crate::route::{Field, RouteName};

/// Errors produced while resolving a route or reading its patterns
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A field the route cannot be built without was absent or empty
    #[error("route `{route}` requires parameter `{field}`")]
    MissingRequiredParameter {
        /// Route being resolved
        route: RouteName,
        /// The absent field
        field: Field,
    },

    /// A textual route name that matches no registered route
    #[error("unknown route `{0}`")]
    UnknownRoute(String),

    /// A pattern string that does not follow the placeholder syntax
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Result alias for route operations
pub type Result<T> = std::result::Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let err = RouteError::MissingRequiredParameter {
            route: RouteName::WebhookDetail,
            field: Field::WebhookId,
        };
        assert_eq!(
            err.to_string(),
            "route `webhook-detail` requires parameter `webhookId`"
        );
    }

    #[test]
    fn test_unknown_route_message() {
        let err = RouteError::UnknownRoute("nowhere".to_string());
        assert_eq!(err.to_string(), "unknown route `nowhere`");
    }

    #[test]
    fn test_invalid_pattern_message() {
        let err = RouteError::InvalidPattern {
            pattern: "/:bogus".to_string(),
            reason: "unknown placeholder `bogus`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid pattern `/:bogus`: unknown placeholder `bogus`"
        );
    }
}

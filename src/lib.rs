//! Routedefs - route table and path resolution for a code review web app
//!
//! Turns a route name plus named parameters into the canonical URL path the
//! front end navigates to, and publishes the matching path-pattern table for
//! the URL matcher that parses those paths back.

pub mod config;
pub mod error;
pub mod paths;
pub mod route;

pub use config::Config;
pub use error::RouteError;
pub use route::pattern::{ConsistencyReport, Pattern, check_consistency};
pub use route::{Field, ResolvedPath, Resolver, Route, RouteName, RouteParameters, resolve};

//! HTTP inbound adapter.
//!
//! Handlers translate requests into domain calls; the security middleware and
//! the failure responder implement the authentication core.

pub mod app;
pub mod articles;
pub mod auth;
pub mod comments;
pub mod error;
pub mod policy;
pub mod responder;
pub mod state;
pub mod users;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::{AppDependencies, build_app, configure_routes};
pub use auth::{AuthenticatedUser, BearerAuthentication};
pub use error::{ApiResult, ErrorResponse};
pub use policy::{AccessPolicy, Authorize, Policy};
pub use responder::FailureResponder;
pub use state::HttpState;

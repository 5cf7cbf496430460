//! Application assembly: routes, extractor configuration and the middleware
//! stack in one place, shared by the server binary and the tests.
//!
//! Requests pass the middleware outside-in:
//!
//! 1. [`Trace`] puts a trace identifier in scope.
//! 2. [`FailureResponder`] renders any failure from further in.
//! 3. [`BearerAuthentication`] verifies a presented token.
//! 4. [`Authorize`] applies the access policy.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::articles::{delete_article, edit_article, post_article};
use super::auth::BearerAuthentication;
use super::comments::{delete_comment, edit_comment, post_comment};
use super::policy::{AccessPolicy, Authorize};
use super::responder::FailureResponder;
use super::state::HttpState;
use super::users::{login, signup, unlink};
use super::validation::{json_config, path_config, unrouted};
use crate::domain::ports::TokenCodec;
use crate::middleware::Trace;

/// Everything the HTTP application needs.
#[derive(Clone)]
pub struct AppDependencies {
    pub state: HttpState,
    pub tokens: Arc<dyn TokenCodec>,
    pub policy: AccessPolicy,
}

impl AppDependencies {
    /// Dependencies with the blog access policy.
    pub fn new(state: HttpState, tokens: Arc<dyn TokenCodec>) -> Self {
        Self {
            state,
            tokens,
            policy: AccessPolicy::blog(),
        }
    }
}

/// Register every API route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(signup)
        .service(login)
        .service(unlink)
        .service(post_article)
        .service(edit_article)
        .service(delete_article)
        .service(post_comment)
        .service(edit_comment)
        .service(delete_comment);
}

/// Build the fully wired application.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        state,
        tokens,
        policy,
    } = deps;
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .configure(configure_routes)
        .default_service(web::to(unrouted))
        .wrap(Authorize::new(policy))
        .wrap(BearerAuthentication::new(tokens))
        .wrap(FailureResponder)
        .wrap(Trace)
}

//! Mapping of framework extraction failures and unrouted requests onto the
//! error taxonomy.

use std::fmt::Display;

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, web};

use super::error::ApiResult;
use super::policy::PathPattern;
use crate::domain::{Error, ErrorCode};

/// Every route the API serves, used to tell `404` from `405`.
pub const ROUTES: &[(Method, &str)] = &[
    (Method::POST, "/users/signup"),
    (Method::POST, "/users/login"),
    (Method::DELETE, "/users/unlink"),
    (Method::POST, "/articles"),
    (Method::PATCH, "/articles/{id}"),
    (Method::DELETE, "/articles/{id}"),
    (Method::POST, "/comments"),
    (Method::PATCH, "/comments/{id}"),
    (Method::DELETE, "/comments/{id}"),
];

/// Wrap a domain validation failure as `INVALID_INPUT_VALUE`.
pub fn invalid_input(err: impl Display) -> Error {
    Error::invalid_input(err.to_string())
}

/// Any unreadable JSON body is `INVALID_INPUT_VALUE`, whether it is
/// malformed, misses a field or has the wrong content type.
fn json_error(err: &JsonPayloadError) -> Error {
    Error::new(ErrorCode::InvalidInputValue).with_detail(err.to_string())
}

/// JSON body configuration routing payload failures through [`json_error`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| json_error(&err).into())
}

/// Path configuration: unparsable segments are `INVALID_TYPE_VALUE`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req| {
        Error::new(ErrorCode::InvalidTypeValue)
            .with_detail(err.to_string())
            .into()
    })
}

/// Kind reported for a request no route accepted.
pub fn unrouted_code(method: &Method, path: &str) -> ErrorCode {
    let allowed: Vec<&Method> = ROUTES
        .iter()
        .filter(|(_, pattern)| PathPattern::parse(pattern).matches(path))
        .map(|(allowed, _)| allowed)
        .collect();
    if allowed.is_empty() || allowed.contains(&method) {
        ErrorCode::NotFound
    } else {
        ErrorCode::MethodNotAllowed
    }
}

/// Default service for requests no handler matched.
pub async fn unrouted(req: HttpRequest) -> ApiResult<HttpResponse> {
    let code = unrouted_code(req.method(), req.path());
    Err(Error::new(code).with_detail(format!("no route for {} {}", req.method(), req.path())))
}

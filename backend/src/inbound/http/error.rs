//! Failure responder: the single place where domain errors become HTTP.
//!
//! Every rejected request, whether refused by the security middleware, failed
//! in a handler or rejected by the framework while extracting input, is
//! rendered by [`respond`] into the same [`ErrorResponse`] body:
//!
//! ```json
//! {"time":"2026-01-01T00:00:00Z","status":"UNAUTHORIZED","message":"...","requestURI":"/articles"}
//! ```

use actix_web::http::StatusCode;
use actix_web::http::header::HeaderValue;
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// HTTP status reported for each taxonomy entry.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::InvalidTypeValue
        | ErrorCode::InvalidInputValue
        | ErrorCode::MissingRequestParameter => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound
        | ErrorCode::UserNotFound
        | ErrorCode::ArticleNotFound
        | ErrorCode::CommentNotFound => StatusCode::NOT_FOUND,
        ErrorCode::EmailAlreadyExists | ErrorCode::InvalidPassword => StatusCode::CONFLICT,
        ErrorCode::TokenUnauthorized
        | ErrorCode::AccessDenied
        | ErrorCode::TokenInvalid
        | ErrorCode::TokenExpired => StatusCode::UNAUTHORIZED,
        ErrorCode::NoPermissionForArticle | ErrorCode::NoPermissionForComment => {
            StatusCode::FORBIDDEN
        }
    }
}

/// Upper snake case name of a status, e.g. `NOT_FOUND`.
pub fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_ascii_uppercase()
        .replace([' ', '-'], "_")
}

/// Wire body shared by every failure.
///
/// Field order is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// RFC 3339 UTC timestamp of the failure.
    #[schema(example = "2026-01-01T00:00:00Z")]
    pub time: String,
    /// HTTP status name.
    #[schema(example = "UNAUTHORIZED")]
    pub status: String,
    /// Human-readable message for the error kind.
    #[schema(example = "An access token is required for this request.")]
    pub message: String,
    /// Path of the rejected request.
    #[serde(rename = "requestURI")]
    #[schema(example = "/articles")]
    pub request_uri: String,
}

impl ErrorResponse {
    pub fn of(code: ErrorCode, request_uri: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            time: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            status: status_name(status_for(code)),
            message: code.message().to_owned(),
            request_uri: request_uri.into(),
        }
    }
}

fn build_response(error: &Error, request_uri: &str) -> HttpResponse {
    let code = error.code();
    let mut builder = HttpResponse::build(status_for(code));
    let trace_id = error
        .trace_id()
        .map(str::to_owned)
        .or_else(|| TraceId::current().map(|id| id.to_string()));
    if let Some(value) = trace_id.and_then(|id| HeaderValue::from_str(&id).ok()) {
        builder.insert_header((TRACE_ID_HEADER, value));
    }
    builder.json(ErrorResponse::of(code, request_uri, Utc::now()))
}

/// Log `error` once and render it for `request_uri`.
///
/// Expected failures log at `warn`; `INTERNAL_SERVER_ERROR` logs at `error`.
/// The internal detail only ever reaches the log.
pub fn respond(error: &Error, request_uri: &str) -> HttpResponse {
    let code = error.code();
    let status = status_for(code).as_u16();
    let detail = error.detail().unwrap_or_default();
    let trace_id = error.trace_id().unwrap_or_default();
    if code.is_expected() {
        warn!(%code, status, request_uri, detail, trace_id, "request rejected");
    } else {
        error!(%code, status, request_uri, detail, trace_id, "request failed");
    }
    build_response(error, request_uri)
}

// Used when an `Error` escapes without the responder middleware in front of it;
// the middleware replaces this body with one carrying the request URI.
impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        build_response(self, "")
    }
}

#[cfg(test)]
mod tests;

//! Domain-level error taxonomy.
//!
//! Every failure the backend can report is one of the [`ErrorCode`] kinds.
//! The codes are transport agnostic: inbound adapters decide which status and
//! envelope each kind maps to, and the HTTP adapter renders all of them through
//! a single responder so clients only ever parse one error schema.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::TraceId;

/// Stable symbolic identifier describing the failure category.
///
/// Serialised in `SCREAMING_SNAKE_CASE` (`TOKEN_EXPIRED`, `USER_NOT_FOUND`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Anything unclassified.
    InternalServerError,
    /// The route exists but not for this HTTP method.
    MethodNotAllowed,
    /// A path or query value could not be converted to the expected type.
    InvalidTypeValue,
    /// The request body is malformed or fails validation.
    InvalidInputValue,
    /// No resource matches the request.
    NotFound,
    /// A required parameter is absent.
    MissingRequestParameter,
    /// The referenced user does not exist.
    UserNotFound,
    /// Signup attempted with an email that is already registered.
    EmailAlreadyExists,
    /// Login attempted with the wrong password.
    InvalidPassword,
    /// No credential was presented on a route that requires one.
    TokenUnauthorized,
    /// The access policy refused the request outright.
    AccessDenied,
    /// A credential was presented but failed verification.
    TokenInvalid,
    /// A credential was presented, verified, and is past its expiry.
    TokenExpired,
    /// The referenced article does not exist.
    ArticleNotFound,
    /// The caller does not own the article.
    NoPermissionForArticle,
    /// The referenced comment does not exist.
    CommentNotFound,
    /// The caller does not own the comment.
    NoPermissionForComment,
}

impl ErrorCode {
    /// Every declared kind, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::InternalServerError,
        Self::MethodNotAllowed,
        Self::InvalidTypeValue,
        Self::InvalidInputValue,
        Self::NotFound,
        Self::MissingRequestParameter,
        Self::UserNotFound,
        Self::EmailAlreadyExists,
        Self::InvalidPassword,
        Self::TokenUnauthorized,
        Self::AccessDenied,
        Self::TokenInvalid,
        Self::TokenExpired,
        Self::ArticleNotFound,
        Self::NoPermissionForArticle,
        Self::CommentNotFound,
        Self::NoPermissionForComment,
    ];

    /// Human-readable message shown to clients.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InternalServerError => "Something went wrong on the server.",
            Self::MethodNotAllowed => "The HTTP method is not supported for this resource.",
            Self::InvalidTypeValue => "A request value has the wrong type.",
            Self::InvalidInputValue => "The request contains an invalid value.",
            Self::NotFound => "The requested resource could not be found.",
            Self::MissingRequestParameter => "A required request parameter is missing.",
            Self::UserNotFound => "The user could not be found.",
            Self::EmailAlreadyExists => "The email address is already registered.",
            Self::InvalidPassword => "The password is not valid.",
            Self::TokenUnauthorized => "An access token is required for this request.",
            Self::AccessDenied => "Access to this resource is denied.",
            Self::TokenInvalid => "The access token is invalid.",
            Self::TokenExpired => "The access token has expired.",
            Self::ArticleNotFound => "The article could not be found.",
            Self::NoPermissionForArticle => "You do not have permission for this article.",
            Self::CommentNotFound => "The comment could not be found.",
            Self::NoPermissionForComment => "You do not have permission for this comment.",
        }
    }

    /// Symbolic name as it appears on the wire and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InvalidTypeValue => "INVALID_TYPE_VALUE",
            Self::InvalidInputValue => "INVALID_INPUT_VALUE",
            Self::NotFound => "NOT_FOUND",
            Self::MissingRequestParameter => "MISSING_REQUEST_PARAMETER",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::TokenUnauthorized => "TOKEN_UNAUTHORIZED",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::ArticleNotFound => "ARTICLE_NOT_FOUND",
            Self::NoPermissionForArticle => "NO_PERMISSION_FOR_ARTICLE",
            Self::CommentNotFound => "COMMENT_NOT_FOUND",
            Self::NoPermissionForComment => "NO_PERMISSION_FOR_COMMENT",
        }
    }

    /// Whether the failure is part of normal operation (logged at `warn`)
    /// rather than a fault (logged at `error`).
    #[must_use]
    pub const fn is_expected(self) -> bool {
        !matches!(self, Self::InternalServerError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain failure: an [`ErrorCode`] plus optional internal context.
///
/// `detail` is for logs only. Adapters render [`ErrorCode::message`] to
/// clients and never expose the detail string.
///
/// # Examples
/// ```
/// use blog_backend::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::ArticleNotFound).with_detail("article 42");
/// assert_eq!(err.code(), ErrorCode::ArticleNotFound);
/// assert_eq!(err.detail(), Some("article 42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    code: ErrorCode,
    detail: Option<String>,
    trace_id: Option<String>,
}

impl DomainError {
    /// Create an error of the given kind.
    ///
    /// Captures the current trace identifier if one is in scope.
    #[must_use]
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            detail: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Attach internal context used in log records.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach a trace identifier explicitly.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InternalServerError`].
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServerError).with_detail(detail)
    }

    /// Convenience constructor for [`ErrorCode::InvalidInputValue`].
    #[must_use]
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInputValue).with_detail(detail)
    }

    /// Failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message for this failure.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.code.message()
    }

    /// Internal context, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Correlation identifier captured at construction.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

impl From<ErrorCode> for Error {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {detail}", self.code),
            None => write!(f, "{}", self.code),
        }
    }
}

impl std::error::Error for DomainError {}

/// Short alias used throughout the crate.
pub type Error = DomainError;

//! Domain primitives, services and ports.
//!
//! Types here are transport agnostic. Inbound adapters translate requests
//! into these types and [`Error`] values back into responses; outbound
//! adapters implement the traits in [`ports`].

pub mod account_service;
pub mod article;
pub mod article_service;
pub mod auth;
pub mod comment;
pub mod comment_service;
pub mod error;
mod ids;
pub mod ports;
mod service_support;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::article::{Article, ArticleDraft, ArticleId, ContentValidationError};
pub use self::article_service::ArticleService;
pub use self::auth::{AccessToken, LoginCredentials, ResolvedIdentity, Role, SignupDetails};
pub use self::comment::{Comment, CommentBody, CommentId};
pub use self::comment_service::CommentService;
pub use self::error::{DomainError, Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, PasswordHash, User, UserId, UserValidationError, Username};

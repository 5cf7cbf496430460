//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing, token signing) are implemented by
//! outbound adapters. Driving ports (`*Command`) are implemented by the domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod article_command;
mod article_repository;
mod comment_command;
mod comment_repository;
mod password_hasher;
mod token_codec;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use article_command::MockArticleCommand;
pub use article_command::{ArticleCommand, PublishedArticle};
#[cfg(test)]
pub use article_repository::MockArticleRepository;
pub use article_repository::{ArticlePersistenceError, ArticleRepository};
#[cfg(test)]
pub use comment_command::MockCommentCommand;
pub use comment_command::{CommentCommand, PublishedComment};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentPersistenceError, CommentRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenIssueError, TokenVerificationError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

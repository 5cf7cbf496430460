//! In-memory persistence adapters.
//!
//! Each repository keeps its records in a `HashMap` behind a
//! [`tokio::sync::RwLock`]. State lives for the lifetime of the process, which
//! makes these adapters suitable for development and integration tests.

mod memory_article_repository;
mod memory_comment_repository;
mod memory_user_repository;

pub use memory_article_repository::InMemoryArticleRepository;
pub use memory_comment_repository::InMemoryCommentRepository;
pub use memory_user_repository::InMemoryUserRepository;

//! Port abstraction for comment persistence.
use async_trait::async_trait;

use crate::domain::{ArticleId, Comment, CommentId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentPersistenceError {
        Connection { message: String } => "comment repository connection failed: {message}",
        Query { message: String } => "comment repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentPersistenceError>;

    async fn find_all_by_article(
        &self,
        article: &ArticleId,
    ) -> Result<Vec<Comment>, CommentPersistenceError>;

    async fn find_all_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Comment>, CommentPersistenceError>;

    /// Insert or replace a comment.
    async fn save(&self, comment: &Comment) -> Result<(), CommentPersistenceError>;

    async fn delete(&self, id: &CommentId) -> Result<(), CommentPersistenceError>;

    /// Remove every listed comment; unknown ids are skipped.
    async fn delete_all(&self, ids: &[CommentId]) -> Result<(), CommentPersistenceError>;
}

//! Driving port for commenting on articles.

use async_trait::async_trait;

use crate::domain::{ArticleId, Comment, CommentBody, CommentId, Email, Error, UserId};

/// Comment together with its author's email, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedComment {
    pub comment: Comment,
    pub author_email: Email,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// Attach a comment to an existing article.
    async fn post(
        &self,
        author: UserId,
        article: ArticleId,
        body: CommentBody,
    ) -> Result<PublishedComment, Error>;

    async fn edit(
        &self,
        author: UserId,
        id: CommentId,
        body: CommentBody,
    ) -> Result<PublishedComment, Error>;

    async fn delete(&self, author: UserId, id: CommentId) -> Result<(), Error>;
}

//! Driving port for article publishing.

use async_trait::async_trait;

use crate::domain::{Article, ArticleDraft, ArticleId, Email, Error, UserId};

/// Article together with its author's email, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArticle {
    pub article: Article,
    pub author_email: Email,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleCommand: Send + Sync {
    async fn post(&self, author: UserId, draft: ArticleDraft) -> Result<PublishedArticle, Error>;

    /// Replace title and content. Only the author may edit.
    async fn edit(
        &self,
        author: UserId,
        id: ArticleId,
        draft: ArticleDraft,
    ) -> Result<PublishedArticle, Error>;

    /// Delete the article and every comment on it. Only the author may delete.
    async fn delete(&self, author: UserId, id: ArticleId) -> Result<(), Error>;
}

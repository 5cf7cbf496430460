//! Port abstraction for article persistence.
use async_trait::async_trait;

use crate::domain::{Article, ArticleId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by article repository adapters.
    pub enum ArticlePersistenceError {
        Connection { message: String } => "article repository connection failed: {message}",
        Query { message: String } => "article repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticlePersistenceError>;

    /// All articles written by `author`, in no particular order.
    async fn find_all_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Article>, ArticlePersistenceError>;

    /// Insert or replace an article.
    async fn save(&self, article: &Article) -> Result<(), ArticlePersistenceError>;

    async fn delete(&self, id: &ArticleId) -> Result<(), ArticlePersistenceError>;
}

//! In-memory implementation of [`ArticleRepository`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ArticlePersistenceError, ArticleRepository};
use crate::domain::{Article, ArticleId, UserId};

#[derive(Debug, Default)]
pub struct InMemoryArticleRepository {
    articles: RwLock<HashMap<ArticleId, Article>>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored articles.
    pub async fn count(&self) -> usize {
        self.articles.read().await.len()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticlePersistenceError> {
        Ok(self.articles.read().await.get(id).cloned())
    }

    async fn find_all_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        Ok(self
            .articles
            .read()
            .await
            .values()
            .filter(|article| article.is_owned_by(*author))
            .cloned()
            .collect())
    }

    async fn save(&self, article: &Article) -> Result<(), ArticlePersistenceError> {
        self.articles
            .write()
            .await
            .insert(article.id(), article.clone());
        Ok(())
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), ArticlePersistenceError> {
        self.articles.write().await.remove(id);
        Ok(())
    }
}

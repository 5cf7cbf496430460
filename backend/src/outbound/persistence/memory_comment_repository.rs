//! In-memory implementation of [`CommentRepository`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{CommentPersistenceError, CommentRepository};
use crate::domain::{ArticleId, Comment, CommentId, UserId};

#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    comments: RwLock<HashMap<CommentId, Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored comments.
    pub async fn count(&self) -> usize {
        self.comments.read().await.len()
    }

    async fn find_where(&self, predicate: impl Fn(&Comment) -> bool) -> Vec<Comment> {
        self.comments
            .read()
            .await
            .values()
            .filter(|comment| predicate(comment))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentPersistenceError> {
        Ok(self.comments.read().await.get(id).cloned())
    }

    async fn find_all_by_article(
        &self,
        article: &ArticleId,
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        let article = *article;
        Ok(self
            .find_where(|comment| comment.article_id() == article)
            .await)
    }

    async fn find_all_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        let author = *author;
        Ok(self.find_where(|comment| comment.is_owned_by(author)).await)
    }

    async fn save(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        self.comments
            .write()
            .await
            .insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn delete(&self, id: &CommentId) -> Result<(), CommentPersistenceError> {
        self.comments.write().await.remove(id);
        Ok(())
    }

    async fn delete_all(&self, ids: &[CommentId]) -> Result<(), CommentPersistenceError> {
        let mut comments = self.comments.write().await;
        for id in ids {
            comments.remove(id);
        }
        Ok(())
    }
}

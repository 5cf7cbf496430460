//! Article publishing service with ownership checks.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    ArticleCommand, ArticleRepository, CommentRepository, PublishedArticle, UserRepository,
};
use crate::domain::service_support::{map_article_error, map_comment_error, require_user};
use crate::domain::{Article, ArticleDraft, ArticleId, Error, ErrorCode, UserId};

/// Article service implementing [`ArticleCommand`].
pub struct ArticleService<U, A, C> {
    users: Arc<U>,
    articles: Arc<A>,
    comments: Arc<C>,
}

impl<U, A, C> ArticleService<U, A, C> {
    pub fn new(users: Arc<U>, articles: Arc<A>, comments: Arc<C>) -> Self {
        Self {
            users,
            articles,
            comments,
        }
    }
}

impl<U, A, C> ArticleService<U, A, C>
where
    A: ArticleRepository,
{
    /// Load an article and check that `author` owns it.
    async fn owned_article(&self, author: UserId, id: ArticleId) -> Result<Article, Error> {
        let article = self
            .articles
            .find_by_id(&id)
            .await
            .map_err(map_article_error)?
            .ok_or_else(|| {
                Error::new(ErrorCode::ArticleNotFound).with_detail(format!("article {id}"))
            })?;
        if !article.is_owned_by(author) {
            return Err(Error::new(ErrorCode::NoPermissionForArticle)
                .with_detail(format!("user {author} does not own article {id}")));
        }
        Ok(article)
    }
}

#[async_trait]
impl<U, A, C> ArticleCommand for ArticleService<U, A, C>
where
    U: UserRepository,
    A: ArticleRepository,
    C: CommentRepository,
{
    async fn post(&self, author: UserId, draft: ArticleDraft) -> Result<PublishedArticle, Error> {
        let user = require_user(self.users.as_ref(), author).await?;
        let article = Article::new(ArticleId::random(), user.id(), draft);
        self.articles
            .save(&article)
            .await
            .map_err(map_article_error)?;
        info!(article_id = %article.id(), user_id = %author, "article posted");
        Ok(PublishedArticle {
            article,
            author_email: user.email().clone(),
        })
    }

    async fn edit(
        &self,
        author: UserId,
        id: ArticleId,
        draft: ArticleDraft,
    ) -> Result<PublishedArticle, Error> {
        let user = require_user(self.users.as_ref(), author).await?;
        let mut article = self.owned_article(user.id(), id).await?;
        article.revise(draft);
        self.articles
            .save(&article)
            .await
            .map_err(map_article_error)?;
        Ok(PublishedArticle {
            article,
            author_email: user.email().clone(),
        })
    }

    async fn delete(&self, author: UserId, id: ArticleId) -> Result<(), Error> {
        let user = require_user(self.users.as_ref(), author).await?;
        let article = self.owned_article(user.id(), id).await?;
        let comment_ids: Vec<_> = self
            .comments
            .find_all_by_article(&article.id())
            .await
            .map_err(map_comment_error)?
            .iter()
            .map(|comment| comment.id())
            .collect();
        self.comments
            .delete_all(&comment_ids)
            .await
            .map_err(map_comment_error)?;
        self.articles
            .delete(&article.id())
            .await
            .map_err(map_article_error)?;
        info!(article_id = %id, comments = comment_ids.len(), "article deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "article_service_tests.rs"]
mod tests;

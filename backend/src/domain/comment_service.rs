//! Comment service with ownership checks.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    ArticleRepository, CommentCommand, CommentRepository, PublishedComment, UserRepository,
};
use crate::domain::service_support::{map_article_error, map_comment_error, require_user};
use crate::domain::{ArticleId, Comment, CommentBody, CommentId, Error, ErrorCode, UserId};

/// Comment service implementing [`CommentCommand`].
pub struct CommentService<U, A, C> {
    users: Arc<U>,
    articles: Arc<A>,
    comments: Arc<C>,
}

impl<U, A, C> CommentService<U, A, C> {
    pub fn new(users: Arc<U>, articles: Arc<A>, comments: Arc<C>) -> Self {
        Self {
            users,
            articles,
            comments,
        }
    }
}

impl<U, A, C> CommentService<U, A, C>
where
    C: CommentRepository,
{
    async fn owned_comment(&self, author: UserId, id: CommentId) -> Result<Comment, Error> {
        let comment = self
            .comments
            .find_by_id(&id)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| {
                Error::new(ErrorCode::CommentNotFound).with_detail(format!("comment {id}"))
            })?;
        if !comment.is_owned_by(author) {
            return Err(Error::new(ErrorCode::NoPermissionForComment)
                .with_detail(format!("user {author} does not own comment {id}")));
        }
        Ok(comment)
    }
}

#[async_trait]
impl<U, A, C> CommentCommand for CommentService<U, A, C>
where
    U: UserRepository,
    A: ArticleRepository,
    C: CommentRepository,
{
    async fn post(
        &self,
        author: UserId,
        article_id: ArticleId,
        body: CommentBody,
    ) -> Result<PublishedComment, Error> {
        let user = require_user(self.users.as_ref(), author).await?;
        let article = self
            .articles
            .find_by_id(&article_id)
            .await
            .map_err(map_article_error)?
            .ok_or_else(|| {
                Error::new(ErrorCode::ArticleNotFound).with_detail(format!("article {article_id}"))
            })?;
        let comment = Comment::new(CommentId::random(), article.id(), user.id(), body);
        self.comments
            .save(&comment)
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %comment.id(), article_id = %article.id(), "comment posted");
        Ok(PublishedComment {
            comment,
            author_email: user.email().clone(),
        })
    }

    async fn edit(
        &self,
        author: UserId,
        id: CommentId,
        body: CommentBody,
    ) -> Result<PublishedComment, Error> {
        let user = require_user(self.users.as_ref(), author).await?;
        let mut comment = self.owned_comment(user.id(), id).await?;
        comment.revise(body);
        self.comments
            .save(&comment)
            .await
            .map_err(map_comment_error)?;
        Ok(PublishedComment {
            comment,
            author_email: user.email().clone(),
        })
    }

    async fn delete(&self, author: UserId, id: CommentId) -> Result<(), Error> {
        let user = require_user(self.users.as_ref(), author).await?;
        let comment = self.owned_comment(user.id(), id).await?;
        self.comments
            .delete(&comment.id())
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %id, "comment deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;

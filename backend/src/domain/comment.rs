//! Comment model.

use super::article::{ArticleId, ContentValidationError};
use super::ids::define_uuid_id;
use super::user::UserId;

define_uuid_id!(
    /// Stable comment identifier.
    CommentId
);

/// Non-blank comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    pub fn try_new(content: impl Into<String>) -> Result<Self, ContentValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ContentValidationError::EmptyContent);
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Comment attached to an article, owned by its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    article_id: ArticleId,
    author: UserId,
    content: String,
}

impl Comment {
    pub fn new(id: CommentId, article_id: ArticleId, author: UserId, body: CommentBody) -> Self {
        Self {
            id,
            article_id,
            author,
            content: body.0,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn article_id(&self) -> ArticleId {
        self.article_id
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.author == user
    }

    pub fn revise(&mut self, body: CommentBody) {
        self.content = body.0;
    }
}

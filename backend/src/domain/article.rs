//! Article model.

use std::fmt;

use super::ids::define_uuid_id;
use super::user::UserId;

define_uuid_id!(
    /// Stable article identifier.
    ArticleId
);

/// Validation errors for article and comment text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValidationError {
    EmptyTitle,
    EmptyContent,
}

impl fmt::Display for ContentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be blank"),
            Self::EmptyContent => write!(f, "content must not be blank"),
        }
    }
}

impl std::error::Error for ContentValidationError {}

/// Title and body of an article, validated as non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    title: String,
    content: String,
}

impl ArticleDraft {
    pub fn try_new(
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ContentValidationError> {
        let title = title.into();
        let content = content.into();
        if title.trim().is_empty() {
            return Err(ContentValidationError::EmptyTitle);
        }
        if content.trim().is_empty() {
            return Err(ContentValidationError::EmptyContent);
        }
        Ok(Self { title, content })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Published article owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    id: ArticleId,
    author: UserId,
    title: String,
    content: String,
}

impl Article {
    pub fn new(id: ArticleId, author: UserId, draft: ArticleDraft) -> Self {
        Self {
            id,
            author,
            title: draft.title,
            content: draft.content,
        }
    }

    pub fn id(&self) -> ArticleId {
        self.id
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.author == user
    }

    /// Replace title and content, keeping identity and ownership.
    pub fn revise(&mut self, draft: ArticleDraft) {
        self.title = draft.title;
        self.content = draft.content;
    }
}

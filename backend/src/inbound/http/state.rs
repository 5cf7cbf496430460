//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! domain ports and stay testable with mocks.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, ArticleCommand, CommentCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub articles: Arc<dyn ArticleCommand>,
    pub comments: Arc<dyn CommentCommand>,
}

impl HttpState {
    pub fn new(
        accounts: Arc<dyn AccountCommand>,
        articles: Arc<dyn ArticleCommand>,
        comments: Arc<dyn CommentCommand>,
    ) -> Self {
        Self {
            accounts,
            articles,
            comments,
        }
    }
}

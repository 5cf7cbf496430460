//! Builders wiring domain services onto the in-memory adapters.

use std::sync::Arc;

use blog_backend::domain::ports::TokenCodec;
use blog_backend::domain::{AccountService, ArticleService, CommentService};
use blog_backend::inbound::http::{AppDependencies, HttpState};
use blog_backend::outbound::persistence::{
    InMemoryArticleRepository, InMemoryCommentRepository, InMemoryUserRepository,
};
use blog_backend::outbound::security::BcryptPasswordHasher;

/// Build the application dependencies over fresh in-memory stores.
pub(super) fn build_dependencies<T>(tokens: Arc<T>) -> AppDependencies
where
    T: TokenCodec + 'static,
{
    let users = Arc::new(InMemoryUserRepository::new());
    let articles = Arc::new(InMemoryArticleRepository::new());
    let comments = Arc::new(InMemoryCommentRepository::new());
    let hasher = Arc::new(BcryptPasswordHasher::default());

    let accounts = AccountService::new(
        users.clone(),
        articles.clone(),
        comments.clone(),
        hasher,
        tokens.clone(),
    );
    let article_service = ArticleService::new(users.clone(), articles.clone(), comments.clone());
    let comment_service = CommentService::new(users, articles, comments);

    let state = HttpState::new(
        Arc::new(accounts),
        Arc::new(article_service),
        Arc::new(comment_service),
    );
    AppDependencies::new(state, tokens)
}

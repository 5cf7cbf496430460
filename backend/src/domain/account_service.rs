//! Account lifecycle service: signup, login and unlink.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountCommand, ArticleRepository, CommentRepository, PasswordHashError, PasswordHasher,
    TokenCodec, TokenIssueError, UserRepository,
};
use crate::domain::service_support::{
    map_article_error, map_comment_error, map_user_error, require_user,
};
use crate::domain::{
    AccessToken, Error, ErrorCode, LoginCredentials, PasswordHash, SignupDetails, User, UserId,
};

/// Account service implementing [`AccountCommand`].
pub struct AccountService<U, A, C, H, T> {
    users: Arc<U>,
    articles: Arc<A>,
    comments: Arc<C>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, A, C, H, T> AccountService<U, A, C, H, T> {
    pub fn new(
        users: Arc<U>,
        articles: Arc<A>,
        comments: Arc<C>,
        hasher: Arc<H>,
        tokens: Arc<T>,
    ) -> Self {
        Self {
            users,
            articles,
            comments,
            hasher,
            tokens,
        }
    }
}

impl<U, A, C, H, T> AccountService<U, A, C, H, T>
where
    H: PasswordHasher + 'static,
{
    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(error.to_string())
    }

    fn map_issue_error(error: TokenIssueError) -> Error {
        Error::internal(error.to_string())
    }

    // Hashing is deliberately slow, so keep it off the async worker threads.
    async fn hash_password(&self, plain: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let plain = Zeroizing::new(plain.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(Self::map_hash_error)
    }

    async fn verify_password(&self, plain: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let plain = Zeroizing::new(plain.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&plain, &hash))
            .await
            .map_err(|err| Error::internal(format!("password check task failed: {err}")))?
            .map_err(Self::map_hash_error)
    }
}

#[async_trait]
impl<U, A, C, H, T> AccountCommand for AccountService<U, A, C, H, T>
where
    U: UserRepository,
    A: ArticleRepository,
    C: CommentRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
{
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error> {
        if self
            .users
            .exists_by_email(details.email())
            .await
            .map_err(map_user_error)?
        {
            return Err(Error::new(ErrorCode::EmailAlreadyExists)
                .with_detail(format!("email {}", details.email())));
        }

        let password_hash = self.hash_password(details.password()).await?;
        let user = User::new(
            UserId::random(),
            details.email().clone(),
            details.username().clone(),
            password_hash,
        );
        self.users.save(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "account created");
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::new(ErrorCode::UserNotFound).with_detail("unknown email"))?;

        let matches = self
            .verify_password(credentials.password(), user.password_hash().clone())
            .await?;
        if !matches {
            return Err(Error::new(ErrorCode::InvalidPassword)
                .with_detail(format!("password mismatch for user {}", user.id())));
        }

        let token = self
            .tokens
            .issue(user.id())
            .map_err(Self::map_issue_error)?;
        info!(user_id = %user.id(), "access token issued");
        Ok(token)
    }

    async fn unlink(&self, user_id: UserId) -> Result<(), Error> {
        let user = require_user(self.users.as_ref(), user_id).await?;

        let articles = self
            .articles
            .find_all_by_author(&user.id())
            .await
            .map_err(map_article_error)?;
        for article in &articles {
            let on_article: Vec<_> = self
                .comments
                .find_all_by_article(&article.id())
                .await
                .map_err(map_comment_error)?
                .iter()
                .map(|comment| comment.id())
                .collect();
            self.comments
                .delete_all(&on_article)
                .await
                .map_err(map_comment_error)?;
            self.articles
                .delete(&article.id())
                .await
                .map_err(map_article_error)?;
        }

        let authored: Vec<_> = self
            .comments
            .find_all_by_author(&user.id())
            .await
            .map_err(map_comment_error)?
            .iter()
            .map(|comment| comment.id())
            .collect();
        self.comments
            .delete_all(&authored)
            .await
            .map_err(map_comment_error)?;

        self.users
            .delete(&user.id())
            .await
            .map_err(map_user_error)?;
        info!(
            user_id = %user.id(),
            articles = articles.len(),
            "account unlinked"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;

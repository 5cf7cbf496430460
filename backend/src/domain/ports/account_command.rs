//! Driving port for account use-cases: signup, login and unlink.
//!
//! Inbound adapters call this without knowing which repositories, hasher or
//! token codec sit behind it, so handler tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, SignupDetails, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new account. Fails with `EMAIL_ALREADY_EXISTS` on duplicates.
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error>;

    /// Check credentials and issue an access token.
    ///
    /// Unknown email yields `USER_NOT_FOUND`; a wrong password yields
    /// `INVALID_PASSWORD`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;

    /// Delete the account along with its articles, the comments on those
    /// articles and every comment the user wrote.
    async fn unlink(&self, user: UserId) -> Result<(), Error>;
}

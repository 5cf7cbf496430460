//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already holds the email being saved.
        EmailTaken { email: String } => "email {email} is already registered",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by (normalised) email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Whether any user is registered under `email`.
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserPersistenceError>;

    /// Insert or replace a user record.
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Remove a user record. Deleting an absent id is not an error.
    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError>;
}

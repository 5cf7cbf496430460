//! Port for one-way password hashing.
//!
//! The algorithm is an adapter concern; the domain only needs to derive a
//! digest at signup and compare a candidate against it at login.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by hashing adapters.
    pub enum PasswordHashError {
        /// Digest could not be derived.
        Hash { message: String } => "password hashing failed: {message}",
        /// Stored digest is not in a format the adapter understands.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a digest for `plain`.
    fn hash(&self, plain: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `plain` against a stored digest.
    fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}

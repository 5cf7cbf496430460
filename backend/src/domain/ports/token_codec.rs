//! Port for issuing and verifying signed access tokens.
//!
//! Verification is pure computation over the token text and the signing key;
//! adapters must not perform I/O.

use crate::domain::{AccessToken, ErrorCode, ResolvedIdentity, UserId};

use super::define_port_error;

define_port_error! {
    /// Reasons a presented token was rejected.
    pub enum TokenVerificationError {
        /// Signature verified but the token is past its expiry.
        Expired => "access token has expired",
        /// Any other failure: bad signature, malformed structure, wrong
        /// algorithm or inconsistent claims.
        Invalid { message: String } => "access token is invalid: {message}",
    }
}

impl TokenVerificationError {
    /// Taxonomy entry reported to the client.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Expired => ErrorCode::TokenExpired,
            Self::Invalid { .. } => ErrorCode::TokenInvalid,
        }
    }
}

define_port_error! {
    /// Failures raised while signing a new token.
    pub enum TokenIssueError {
        Signing { message: String } => "access token signing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign a token for `user` valid for the codec's configured lifetime.
    fn issue(&self, user: UserId) -> Result<AccessToken, TokenIssueError>;

    /// Verify `token` and resolve the caller identity it carries.
    fn verify(&self, token: &str) -> Result<ResolvedIdentity, TokenVerificationError>;
}

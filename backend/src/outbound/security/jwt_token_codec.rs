//! HS256 JSON Web Token implementation of [`TokenCodec`].
//!
//! Tokens carry `sub` and a redundant `id` claim (both the user id), plus
//! `iat` and `exp` in seconds since the epoch. Issuance reads the injected
//! [`Clock`]; verification uses `jsonwebtoken`'s own notion of now with zero
//! leeway, so an expired token is rejected the moment `exp` passes.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::{TokenCodec, TokenIssueError, TokenVerificationError};
use crate::domain::{AccessToken, ResolvedIdentity, UserId};

/// Default lifetime of an access token.
pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: String,
    id: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies access tokens with a shared HMAC secret.
///
/// The keys are derived once; rotating the secret means building a new codec,
/// which invalidates every token signed with the old one.
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenCodec {
    /// Derive signing keys from `secret`.
    ///
    /// The codec keeps its own copy of the key material; callers may zeroize
    /// `secret` afterwards.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
        }
    }

    fn resolve(claims: AccessClaims) -> Result<ResolvedIdentity, TokenVerificationError> {
        if claims.sub != claims.id {
            return Err(TokenVerificationError::invalid("subject and id claims differ"));
        }
        let user_id: UserId = claims
            .sub
            .parse()
            .map_err(|_| TokenVerificationError::invalid("subject is not a user id"))?;
        Ok(ResolvedIdentity::user(user_id))
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user: UserId) -> Result<AccessToken, TokenIssueError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenIssueError::signing("token expiry overflows the calendar"))?;
        let claims = AccessClaims {
            sub: user.to_string(),
            id: user.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(AccessToken::new)
            .map_err(|err| TokenIssueError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<ResolvedIdentity, TokenVerificationError> {
        let data =
            decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(|err| {
                match err.kind() {
                    ErrorKind::ExpiredSignature => {
                        info!("rejected expired access token");
                        TokenVerificationError::expired()
                    }
                    _ => {
                        info!(error = %err, "rejected invalid access token");
                        TokenVerificationError::invalid(err.to_string())
                    }
                }
            })?;
        Self::resolve(data.claims)
    }
}

//! Access-token configuration parsing and validation.
//!
//! Settings come from the environment through [`mockable::Env`] so they can be
//! validated consistently and tested in isolation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mockable::{Clock, Env};
use tracing::warn;
use uuid::Uuid;
use zeroize::{Zeroize, Zeroizing};

use super::jwt_token_codec::{DEFAULT_ACCESS_TOKEN_TTL, JwtTokenCodec};

const SECRET_DEFAULT_PATH: &str = "/var/run/secrets/jwt_secret";
/// Minimum secret length accepted in release builds (HS256 key size).
pub const SECRET_MIN_LEN: usize = 32;
const SECRET_ENV: &str = "JWT_SECRET";
const SECRET_FILE_ENV: &str = "JWT_SECRET_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "JWT_ALLOW_EPHEMERAL";
const TTL_ENV: &str = "ACCESS_TOKEN_TTL_MINUTES";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const MINUTES_EXPECTED: &str = "a positive number of minutes";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds refuse weak or missing secrets.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated token settings.
///
/// The secret is zeroized when the settings are dropped, including after
/// [`TokenSettings::into_codec`] derives the signing keys.
pub struct TokenSettings {
    secret: Zeroizing<Vec<u8>>,
    /// Lifetime of issued tokens.
    pub ttl: Duration,
}

impl TokenSettings {
    /// Derive the JWT codec and discard the raw secret.
    pub fn into_codec(self, clock: Arc<dyn Clock>) -> JwtTokenCodec {
        JwtTokenCodec::new(&self.secret, self.ttl, clock)
    }

    /// Length of the configured secret in bytes.
    pub fn secret_len(&self) -> usize {
        self.secret.len()
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret is too short for release builds.
    #[error("token secret from {origin} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        origin: String,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not allow ephemeral secrets.
    #[error("JWT_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build token settings from environment variables and build mode.
///
/// `JWT_SECRET` takes precedence over the file named by `JWT_SECRET_FILE`.
///
/// # Examples
///
/// ```rust
/// use blog_backend::outbound::security::{BuildMode, token_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     "ACCESS_TOKEN_TTL_MINUTES" => Some("15".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release).expect("valid settings");
/// assert_eq!(settings.ttl.as_secs(), 15 * 60);
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let ttl = ttl_from_env(env, mode)?;
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let secret = secret_from_env(env, mode, allow_ephemeral)?;
    Ok(TokenSettings { secret, ttl })
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, TokenConfigError> {
    let Some(value) = env.string(TTL_ENV) else {
        return Ok(DEFAULT_ACCESS_TOKEN_TTL);
    };
    match value.trim().parse::<u64>() {
        Ok(minutes) if minutes > 0 => Ok(Duration::from_secs(minutes.saturating_mul(60))),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid ACCESS_TOKEN_TTL_MINUTES; using default");
            Ok(DEFAULT_ACCESS_TOKEN_TTL)
        }
        _ => Err(TokenConfigError::InvalidEnv {
            name: TTL_ENV,
            value,
            expected: MINUTES_EXPECTED,
        }),
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(TokenConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid JWT_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    if let Some(mut inline) = env.string(SECRET_ENV) {
        let secret = Zeroizing::new(inline.as_bytes().to_vec());
        inline.zeroize();
        return checked_length(secret, SECRET_ENV.to_owned(), mode);
    }

    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| SECRET_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(bytes) => checked_length(Zeroizing::new(bytes), path.display().to_string(), mode),
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token secret (dev only); tokens die with the process"
                );
                Ok(ephemeral_secret())
            } else {
                Err(TokenConfigError::SecretRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn checked_length(
    secret: Zeroizing<Vec<u8>>,
    origin: String,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let length = secret.len();
    if length >= SECRET_MIN_LEN {
        return Ok(secret);
    }
    if mode.is_debug() && length > 0 {
        warn!(origin = %origin, length, "token secret shorter than recommended");
        return Ok(secret);
    }
    Err(TokenConfigError::SecretTooShort {
        origin,
        length,
        min_len: SECRET_MIN_LEN,
    })
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut secret = Zeroizing::new(Vec::with_capacity(SECRET_MIN_LEN * 2));
    for _ in 0..4 {
        secret.extend_from_slice(Uuid::new_v4().as_bytes());
    }
    secret
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

//! Security adapters: password hashing, access-token signing and its
//! configuration.

mod bcrypt_password_hasher;
mod jwt_token_codec;
mod token_config;

pub use bcrypt_password_hasher::BcryptPasswordHasher;
pub use jwt_token_codec::{DEFAULT_ACCESS_TOKEN_TTL, JwtTokenCodec};
pub use token_config::{
    BuildMode, SECRET_MIN_LEN, TokenConfigError, TokenSettings, token_settings_from_env,
};

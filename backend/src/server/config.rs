//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use blog_backend::outbound::security::{
    BuildMode, TokenConfigError, TokenSettings, token_settings_from_env,
};
use mockable::Env;

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const BIND_ADDR_DEFAULT: &str = "0.0.0.0:8080";

/// Errors raised while assembling the server configuration.
#[derive(thiserror::Error, Debug)]
pub enum ServerConfigError {
    /// `BIND_ADDR` is not a socket address.
    #[error("invalid value for BIND_ADDR='{value}'; expected host:port")]
    InvalidBindAddr { value: String },
    /// Token settings failed validation.
    #[error(transparent)]
    Token(#[from] TokenConfigError),
}

/// Settings the server needs at startup.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: TokenSettings,
}

impl ServerConfig {
    /// Read the configuration from the environment.
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ServerConfigError> {
        let raw = env
            .string(BIND_ADDR_ENV)
            .unwrap_or_else(|| BIND_ADDR_DEFAULT.to_owned());
        let bind_addr = raw
            .parse()
            .map_err(|_| ServerConfigError::InvalidBindAddr { value: raw })?;
        let tokens = token_settings_from_env(env, mode)?;
        Ok(Self { bind_addr, tokens })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;

    const STRONG: &str = "0123456789abcdef0123456789abcdef";

    fn env_with(bind_addr: Option<&'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string().times(0..).returning(move |key| match key {
            "BIND_ADDR" => bind_addr.map(str::to_owned),
            "JWT_SECRET" => Some(STRONG.to_owned()),
            _ => None,
        });
        env
    }

    #[rstest]
    fn bind_address_defaults_to_all_interfaces() {
        let config = ServerConfig::from_env(&env_with(None), BuildMode::Release).expect("config");
        assert_eq!(config.bind_addr().to_string(), BIND_ADDR_DEFAULT);
    }

    #[rstest]
    fn bind_address_is_read_from_the_environment() {
        let config = ServerConfig::from_env(&env_with(Some("127.0.0.1:9000")), BuildMode::Release)
            .expect("config");
        assert_eq!(config.bind_addr().port(), 9000);
    }

    #[rstest]
    fn malformed_bind_address_is_rejected() {
        let result = ServerConfig::from_env(&env_with(Some("localhost")), BuildMode::Release);
        assert!(matches!(
            result,
            Err(ServerConfigError::InvalidBindAddr { .. })
        ));
    }
}

//! Backend entry-point: reads configuration, initialises tracing and serves
//! the blog API.

mod server;

use blog_backend::outbound::security::BuildMode;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let config = ServerConfig::from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid server configuration")?;
    let bind_addr = config.bind_addr();
    let server = create_server(config).wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    server.await.wrap_err("server terminated with an error")?;
    Ok(())
}

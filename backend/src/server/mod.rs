//! Server construction.

mod config;
mod state_builders;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::HttpServer;
use actix_web::dev::Server;
use blog_backend::inbound::http::build_app;
use mockable::DefaultClock;
use tracing::info;

use state_builders::build_dependencies;

/// Construct an Actix HTTP server from `config`.
///
/// The token secret is consumed here: the codec derives its keys and the raw
/// bytes are zeroized.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, tokens } = config;
    let ttl_minutes = tokens.ttl.as_secs() / 60;
    let codec = Arc::new(tokens.into_codec(Arc::new(DefaultClock)));
    let deps = build_dependencies(codec);

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();
    info!(%bind_addr, ttl_minutes, "blog backend listening");
    Ok(server)
}

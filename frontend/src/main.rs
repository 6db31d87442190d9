//! Front-end entry point: loads settings, builds adapters and serves pages.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use frontend::inbound::http::HealthState;
use frontend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use frontend::outbound::backend_http::HttpBackendTransport;
use frontend::outbound::views::HandlebarsViewRenderer;
use frontend::settings::FrontendSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = FrontendSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let backend_url = settings.backend_url().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %session.key_fingerprint(),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let transport = HttpBackendTransport::new(backend_url.clone(), settings.request_timeout())
        .map_err(std::io::Error::other)?;
    let views = HandlebarsViewRenderer::new().map_err(std::io::Error::other)?;

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        bind_addr,
        Arc::new(transport),
        Arc::new(views),
    );
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, backend = %backend_url, "front end listening");
    server.await
}

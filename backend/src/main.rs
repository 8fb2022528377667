//! Backend entry-point: loads settings, wires the storage tiers and serves
//! the REST endpoints.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::settings::AppSettings;
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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| {
            error!(error = %e, "failed to load settings");
            std::io::Error::other(format!("failed to load settings: {e}"))
        })?;
    let config = ServerConfig::from_settings(&settings).map_err(|e| {
        error!(error = %e, "invalid settings");
        std::io::Error::other(e.to_string())
    })?;
    if config.database_url.is_none() {
        warn!("no database url configured; durable tier disabled");
    }
    info!(bind_addr = %config.bind_addr(), "starting portfolio backend");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

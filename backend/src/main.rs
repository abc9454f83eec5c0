//! Catalogue entry-point: loads settings, wires REST endpoints and OpenAPI
//! docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerSettings, config_from_settings, create_server};
use vehicle_catalogue::inbound::http::health::HealthState;

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

    let settings =
        ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let config = config_from_settings(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(bind_addr = ?settings.bind_addr().ok(), "catalogue server started");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}

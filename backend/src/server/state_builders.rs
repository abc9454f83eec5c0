//! Builders for HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use vehicle_catalogue::domain::VehicleQueryService;
use vehicle_catalogue::domain::ports::VehicleRepository;
use vehicle_catalogue::inbound::http::state::HttpState;
use vehicle_catalogue::outbound::memory::InMemoryVehicleRepository;
use vehicle_catalogue::outbound::persistence::DieselVehicleRepository;

use super::ServerConfig;

/// Pick the vehicle repository: PostgreSQL when a pool is configured,
/// otherwise the in-memory demo catalogue.
fn build_vehicle_repository(config: &ServerConfig) -> std::io::Result<Arc<dyn VehicleRepository>> {
    match &config.db_pool {
        Some(pool) => {
            info!("serving vehicles from PostgreSQL");
            Ok(Arc::new(DieselVehicleRepository::new(pool.clone())))
        }
        None => {
            info!("no database configured; serving the demo catalogue");
            let repository = InMemoryVehicleRepository::demo()
                .map_err(|err| std::io::Error::other(format!("invalid demo catalogue: {err}")))?;
            Ok(Arc::new(repository))
        }
    }
}

/// Assemble the handler state from configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let repository = build_vehicle_repository(config)?;
    let vehicles = VehicleQueryService::new(repository).with_max_page_size(config.max_page_size);
    Ok(web::Data::new(HttpState::new(
        Arc::new(vehicles),
        Arc::new(config.login.clone()),
    )))
}

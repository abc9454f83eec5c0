//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, VehicleQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub vehicles: Arc<dyn VehicleQuery>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    pub fn new(vehicles: Arc<dyn VehicleQuery>, login: Arc<dyn LoginService>) -> Self {
        Self { vehicles, login }
    }
}

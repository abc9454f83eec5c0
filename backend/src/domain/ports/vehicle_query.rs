//! Driving port for vehicle catalogue reads.
//!
//! Inbound adapters forward raw listing parameters through this port; all
//! validation happens behind it so every adapter enforces the same rules.

use async_trait::async_trait;
use pagination::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, Page};

use crate::domain::sort::{SortDirection, SortField};
use crate::domain::{Error, Vehicle, VehicleFilter, VehicleId};

/// Raw listing parameters.
///
/// Page and sort values are unvalidated; the service rejects them before
/// storage is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListVehiclesRequest {
    pub filter: VehicleFilter,
    pub page_number: i64,
    pub page_size: i64,
    pub sort_by: String,
    pub sort_dir: String,
}

impl Default for ListVehiclesRequest {
    fn default() -> Self {
        Self {
            filter: VehicleFilter::default(),
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: SortField::Id.as_str().to_owned(),
            sort_dir: SortDirection::Ascending.token().to_owned(),
        }
    }
}

/// Use-case port for listing and fetching vehicles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleQuery: Send + Sync {
    /// Validate the request and return one page of matches.
    async fn list_vehicles(&self, request: ListVehiclesRequest) -> Result<Page<Vehicle>, Error>;

    /// Return one vehicle or a `NotFound` error naming the id.
    async fn get_vehicle(&self, id: VehicleId) -> Result<Vehicle, Error>;
}

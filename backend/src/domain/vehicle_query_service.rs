//! Catalogue read service.
//!
//! Validates sort and page input, composes the filter predicate and executes
//! the resulting query against a [`VehicleRepository`]. Storage is only
//! reached once every input has been accepted.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use serde_json::json;
use tracing::debug;

use super::ports::{
    ListVehiclesRequest, VehicleQuery, VehicleQuerySpec, VehicleRepository,
};
use super::predicate::compose;
use super::sort::SortValidator;
use super::{Error, ErrorCode, Vehicle, VehicleId, build_page_descriptor};

/// Largest page size accepted unless configured otherwise.
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

/// [`VehicleQuery`] implementation backed by a storage port.
#[derive(Clone)]
pub struct VehicleQueryService {
    repository: Arc<dyn VehicleRepository>,
    max_page_size: u64,
}

impl VehicleQueryService {
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self {
            repository,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Override the page size cap.
    #[must_use]
    pub fn with_max_page_size(mut self, max_page_size: u64) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    fn check_page_size_cap(&self, page_size: u64) -> Result<(), Error> {
        if page_size <= self.max_page_size {
            return Ok(());
        }
        let max = self.max_page_size;
        Err(Error::new(
            ErrorCode::InvalidPageSize,
            format!("pageSize must be less than or equal to {max}, got {page_size}"),
        )
        .with_details(json!({ "parameter": "pageSize", "value": page_size, "max": max })))
    }
}

#[async_trait]
impl VehicleQuery for VehicleQueryService {
    async fn list_vehicles(&self, request: ListVehiclesRequest) -> Result<Page<Vehicle>, Error> {
        let ListVehiclesRequest {
            filter,
            page_number,
            page_size,
            sort_by,
            sort_dir,
        } = request;
        let sort = SortValidator::validate(&sort_by, &sort_dir)?;
        let page = build_page_descriptor(page_number, page_size, sort)?;
        self.check_page_size_cap(page.limit())?;
        let spec = VehicleQuerySpec {
            predicate: compose(&filter),
            page,
        };
        debug!(
            offset = spec.page.offset(),
            limit = spec.page.limit(),
            sort_by = %sort.field(),
            sort_dir = %sort.direction(),
            conditions = spec.predicate.conditions().len(),
            "listing vehicles"
        );
        let slice = self.repository.find_page(&spec).await?;
        Ok(Page::new(slice.items, slice.total, spec.page.request()))
    }

    async fn get_vehicle(&self, id: VehicleId) -> Result<Vehicle, Error> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Vehicle with id {id} not found")))
    }
}

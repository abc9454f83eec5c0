//! Driven port for reading vehicle records.
//!
//! Adapters receive a fully validated [`VehicleQuerySpec`]: the composed
//! predicate, the offset/limit pair and an allow-listed sort order. They never
//! see raw request input.

use async_trait::async_trait;

use crate::domain::predicate::Predicate;
use crate::domain::{Error, Vehicle, VehicleId, VehiclePageDescriptor};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vehicle storage adapters.
    pub enum VehicleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "vehicle read connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "vehicle read query failed: {message}",
    }
}

impl From<VehicleRepositoryError> for Error {
    fn from(value: VehicleRepositoryError) -> Self {
        Error::internal(value.to_string())
    }
}

/// Validated listing request handed to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleQuerySpec {
    pub predicate: Predicate,
    pub page: VehiclePageDescriptor,
}

/// One ordered slice of matches plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VehicleSlice {
    pub items: Vec<Vehicle>,
    pub total: u64,
}

/// Port for reading vehicles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Return the slice described by `spec`.
    ///
    /// Items are ordered by the requested sort key, then by ascending id.
    /// `total` counts every match regardless of the slice bounds.
    async fn find_page(&self, spec: &VehicleQuerySpec)
    -> Result<VehicleSlice, VehicleRepositoryError>;

    /// Look up one vehicle; `Ok(None)` when no record has this id.
    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, VehicleRepositoryError>;
}

//! Domain primitives and services.
//!
//! Purpose: Define the vehicle catalogue model, the filter/sort/page
//! validation rules and the query service. Nothing here knows about HTTP or
//! SQL; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure value.
//! - Vehicle, Customer, Maintainer, ServiceRecord: read-only records.
//! - VehicleFilter / FilterText: optional text filters.
//! - predicate: composable filter predicates.
//! - sort: sort allow-list and validated sort order.
//! - VehicleQueryService: the catalogue read use-case.

pub mod auth;
pub mod error;
mod page_request;
pub mod ports;
pub mod predicate;
pub mod sort;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod user;
mod vehicle;
mod vehicle_filter;
mod vehicle_query_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::page_request::{VehiclePageDescriptor, build_page_descriptor};
pub use self::user::{UserId, UserIdError};
pub use self::vehicle::{
    Customer, Maintainer, ServiceRecord, Vehicle, VehicleDraft, VehicleId, VehicleIdError,
};
pub use self::vehicle_filter::{FilterText, VehicleFilter};
pub use self::vehicle_query_service::{DEFAULT_MAX_PAGE_SIZE, VehicleQueryService};

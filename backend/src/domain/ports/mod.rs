//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod vehicle_query;
mod vehicle_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{ConfiguredLoginService, LoginService};
#[cfg(test)]
pub use vehicle_query::MockVehicleQuery;
pub use vehicle_query::{ListVehiclesRequest, VehicleQuery};
#[cfg(test)]
pub use vehicle_repository::MockVehicleRepository;
pub use vehicle_repository::{
    VehicleQuerySpec, VehicleRepository, VehicleRepositoryError, VehicleSlice,
};

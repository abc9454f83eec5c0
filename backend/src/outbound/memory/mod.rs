//! Process-local adapters used for demos and tests.

mod vehicle_repository;

pub use vehicle_repository::{DemoDataError, InMemoryVehicleRepository, demo_vehicles};

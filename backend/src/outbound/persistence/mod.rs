//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the vehicle repository port backed by
//! PostgreSQL via Diesel, with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database errors are mapped to
//!   `VehicleRepositoryError`.
//!
//! # Example
//!
//! ```no_run
//! use vehicle_catalogue::outbound::persistence::{DbPool, DieselVehicleRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), vehicle_catalogue::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalogue")).await?;
//! let repository = DieselVehicleRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_helpers;
mod diesel_vehicle_repository;
mod models;
mod pool;
mod schema;

pub use diesel_vehicle_repository::DieselVehicleRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

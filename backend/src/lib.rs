//! Vehicle catalogue library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the catalogue
//! model, validation rules and ports; [`inbound`] and [`outbound`] adapt them
//! to HTTP and storage.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

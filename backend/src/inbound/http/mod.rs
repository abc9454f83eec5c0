//! HTTP inbound adapter exposing REST endpoints.
//!
//! [`configure`] registers the catalogue API and its extractor error
//! handlers; callers mount it under `/api/v1` behind session middleware.
//! The services sit inside a [`Trace`] scope, so every error payload carries
//! the request path even when the host app does not wrap [`Trace`] itself.

pub mod auth;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
mod validation;
pub mod vehicles;

use actix_web::web;

use crate::middleware::Trace;

pub use error::ApiResult;

/// Register the catalogue API services.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use vehicle_catalogue::inbound::http::configure;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(
            web::scope("")
                .wrap(Trace)
                .service(vehicles::list_vehicles)
                .service(vehicles::get_vehicle)
                .service(auth::login),
        );
}

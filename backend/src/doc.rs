//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the vehicle, auth and health endpoints together with
//! the wire DTOs and the error payload. The document backs Swagger UI in debug
//! builds and is exported via `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ErrorCode;
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::error::ErrorPayload;
use crate::inbound::http::vehicles::{ServiceRecordDto, VehicleDto, VehiclePageSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Vehicle catalogue API",
        description = "Filterable, sortable and paginated read access to vehicle records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::vehicles::list_vehicles,
        crate::inbound::http::vehicles::get_vehicle,
        crate::inbound::http::auth::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        VehicleDto,
        ServiceRecordDto,
        VehiclePageSchema,
        LoginRequest,
        ErrorPayload,
        ErrorCode
    )),
    tags(
        (name = "vehicles", description = "Vehicle catalogue queries"),
        (name = "auth", description = "Session login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

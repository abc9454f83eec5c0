//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use vehicle_catalogue::Trace;
#[cfg(debug_assertions)]
use vehicle_catalogue::doc::ApiDoc;
use vehicle_catalogue::inbound::http::configure;
use vehicle_catalogue::inbound::http::error::route_not_found;
use vehicle_catalogue::inbound::http::health::{HealthState, live, ready};
use vehicle_catalogue::inbound::http::session_config::{
    BuildMode, SessionSettings, session_settings,
};
use vehicle_catalogue::inbound::http::state::HttpState;
use vehicle_catalogue::outbound::persistence::{DbPool, PoolConfig};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(session.middleware())
        .configure(configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(route_not_found))
}

/// Resolve settings into a [`ServerConfig`], connecting to PostgreSQL when a
/// database URL is configured.
///
/// # Errors
/// Returns [`std::io::Error`] when a setting is malformed, the session key
/// cannot be loaded or the pool cannot be built.
pub async fn config_from_settings(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let max_page_size = settings.max_page_size().map_err(std::io::Error::other)?;
    let login = settings.login_service().map_err(std::io::Error::other)?;
    let session = session_settings(
        &settings.session_toggles(),
        BuildMode::from_debug_assertions(),
    )
    .map_err(std::io::Error::other)?;

    let config = ServerConfig::new(session, bind_addr, login).with_max_page_size(max_page_size);
    let Some(url) = settings.database_url() else {
        return Ok(config);
    };
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
        .await
        .map_err(std::io::Error::other)?;
    Ok(config.with_db_pool(pool))
}

/// Construct an Actix HTTP server from the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when building state, binding the socket or
/// starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        session, bind_addr, ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

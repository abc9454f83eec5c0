//! Login handler.
//!
//! ```text
//! POST /api/v1/auth/login {"email":"admin@example.com","password":"password"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::LoginCredentials;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorPayload;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/auth/login`.
///
/// Missing fields are treated as empty so every problem is reported together.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Authenticate against the configured account and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 204, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorPayload),
        (status = 401, description = "Invalid credentials", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "login succeeded");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::ports::{MockLoginService, MockVehicleQuery};
    use crate::domain::{Error, ErrorCode, UserId};
    use crate::inbound::http::test_utils::test_session_middleware;

    const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn post_login(
        login_service: MockLoginService,
        body: serde_json::Value,
    ) -> actix_web::dev::ServiceResponse {
        let state = web::Data::new(HttpState::new(
            Arc::new(MockVehicleQuery::new()),
            Arc::new(login_service),
        ));
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .wrap(test_session_middleware())
                .service(web::scope("/api/v1").service(login)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(body)
            .to_request();
        actix_test::call_service(&app, request).await
    }

    #[actix_web::test]
    async fn valid_login_sets_session_cookie() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_authenticate()
            .withf(|credentials| credentials.email() == "admin@example.com")
            .times(1)
            .return_once(|_| UserId::new(USER_ID).map_err(|err| Error::internal(err.to_string())));

        let res = post_login(
            login_service,
            json!({"email": " admin@example.com ", "password": "password"}),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert!(res.response().cookies().any(|cookie| cookie.name() == "session"));
    }

    #[rstest]
    #[case(json!({}), &["email", "password"])]
    #[case(json!({"email": "   ", "password": "secret"}), &["email"])]
    #[case(json!({"email": "not-an-email", "password": ""}), &["email", "password"])]
    #[actix_web::test]
    async fn invalid_bodies_report_every_field(
        #[case] body: serde_json::Value,
        #[case] fields: &[&str],
    ) {
        let mut login_service = MockLoginService::new();
        login_service.expect_authenticate().never();

        let res = post_login(login_service, body).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: ErrorPayload = actix_test::read_body_json(res).await;
        assert_eq!(payload.code, ErrorCode::ValidationFailed);
        let errors = payload.errors.expect("field errors");
        let reported: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(reported, fields);
    }

    #[actix_web::test]
    async fn wrong_credentials_are_unauthorized() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_authenticate()
            .return_once(|_| Err(Error::unauthorized("Invalid credentials")));

        let res = post_login(
            login_service,
            json!({"email": "admin@example.com", "password": "nope"}),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().next().is_none());
    }
}

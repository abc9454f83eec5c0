//! Vehicle catalogue API handlers.
//!
//! ```text
//! GET /api/v1/vehicles?make=toy&sortBy=ownerName&sortDir=desc&pageSize=5
//! GET /api/v1/vehicles?view=page
//! GET /api/v1/vehicles/{id}
//! ```
//!
//! Raw parameters are parsed here; sort, page and filter rules are enforced
//! by the [`VehicleQuery`](crate::domain::ports::VehicleQuery) port.

use actix_web::{HttpResponse, get, web};
use chrono::NaiveDate;
use pagination::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, Page};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ListVehiclesRequest;
use crate::domain::sort::{SortDirection, SortField};
use crate::domain::{Error, ServiceRecord, Vehicle, VehicleFilter, VehicleId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorPayload;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldErrors, FieldName};

/// Response header carrying the total match count in the list view.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

const PAGE_NUMBER: FieldName = FieldName::new("pageNumber");
const PAGE_SIZE: FieldName = FieldName::new("pageSize");
const VIEW: FieldName = FieldName::new("view");

/// Query string accepted by `GET /api/v1/vehicles`.
///
/// Every field is optional. Unknown parameters are rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListVehiclesQuery {
    /// Case-insensitive substring of the make.
    pub make: Option<String>,
    /// Case-insensitive substring of the model.
    pub model: Option<String>,
    /// Case-insensitive substring of the owner's name.
    pub owner_name: Option<String>,
    /// Case-insensitive substring of the maintainer's name.
    pub maintainer_name: Option<String>,
    /// Zero-based page index; defaults to 0.
    pub page_number: Option<String>,
    /// Page size; defaults to 10.
    pub page_size: Option<String>,
    /// One of `id`, `make`, `model`, `ownerName`, `maintainerName`.
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`, case-insensitive.
    pub sort_dir: Option<String>,
    /// `list` (bare array, default) or `page` (envelope).
    pub view: Option<String>,
}

/// Response rendering for a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseView {
    /// Bare JSON array with the total in [`TOTAL_COUNT_HEADER`].
    #[default]
    List,
    /// `{content, totalElements, totalPages, number, size}` envelope.
    Page,
}

impl ResponseView {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "list" => Some(Self::List),
            "page" => Some(Self::Page),
            _ => None,
        }
    }
}

impl ListVehiclesQuery {
    /// Parse text parameters into a listing request and a response view.
    ///
    /// Malformed integers and unknown views are reported together as one
    /// `ValidationFailed` error.
    pub fn into_request(self) -> Result<(ListVehiclesRequest, ResponseView), Error> {
        let mut errors = FieldErrors::default();
        let page_number =
            errors.integer_or(PAGE_NUMBER, self.page_number.as_deref(), DEFAULT_PAGE_NUMBER);
        let page_size = errors.integer_or(PAGE_SIZE, self.page_size.as_deref(), DEFAULT_PAGE_SIZE);
        let view = match self.view.as_deref() {
            None => ResponseView::default(),
            Some(raw) => ResponseView::parse(raw).unwrap_or_else(|| {
                errors.push(
                    VIEW,
                    format!("view must be one of [list, page], got '{raw}'"),
                );
                ResponseView::default()
            }),
        };
        errors.finish()?;

        let request = ListVehiclesRequest {
            filter: VehicleFilter::from_parts(
                self.make,
                self.model,
                self.owner_name,
                self.maintainer_name,
            ),
            page_number,
            page_size,
            sort_by: self
                .sort_by
                .unwrap_or_else(|| SortField::default().as_str().to_owned()),
            sort_dir: self
                .sort_dir
                .unwrap_or_else(|| SortDirection::default().token().to_owned()),
        };
        Ok((request, view))
    }
}

/// One service history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordDto {
    pub id: i64,
    pub description: String,
    pub performed_on: NaiveDate,
}

impl From<&ServiceRecord> for ServiceRecordDto {
    fn from(value: &ServiceRecord) -> Self {
        Self {
            id: value.id(),
            description: value.description().to_owned(),
            performed_on: value.performed_on(),
        }
    }
}

/// Vehicle as rendered on the wire.
///
/// Example JSON:
/// `{"id":1,"make":"Toyota","model":"Camry","ownerName":"John Doe","maintainerName":"Service Center A","services":[]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub owner_name: String,
    pub maintainer_name: String,
    pub services: Vec<ServiceRecordDto>,
}

impl From<&Vehicle> for VehicleDto {
    fn from(value: &Vehicle) -> Self {
        Self {
            id: value.id().get(),
            make: value.make().to_owned(),
            model: value.model().to_owned(),
            owner_name: value.owner().name().to_owned(),
            maintainer_name: value.maintainer().name().to_owned(),
            services: value.services().iter().map(ServiceRecordDto::from).collect(),
        }
    }
}

/// OpenAPI shape of the `view=page` envelope.
#[derive(ToSchema)]
#[schema(as = VehiclePage, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct VehiclePageSchema {
    content: Vec<VehicleDto>,
    total_elements: u64,
    total_pages: u64,
    number: u64,
    size: u64,
}

fn render(page: Page<Vehicle>, view: ResponseView) -> HttpResponse {
    let page = page.map(|vehicle| VehicleDto::from(&vehicle));
    match view {
        ResponseView::Page => HttpResponse::Ok().json(page),
        ResponseView::List => HttpResponse::Ok()
            .insert_header((TOTAL_COUNT_HEADER, page.total_elements().to_string()))
            .json(page.into_content()),
    }
}

/// List vehicles with optional filters, sorting and pagination.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use vehicle_catalogue::inbound::http::vehicles::list_vehicles;
///
/// let app = App::new().service(web::scope("/api/v1").service(list_vehicles));
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    params(ListVehiclesQuery),
    responses(
        (status = 200, description = "Matching vehicles: a bare array by default, a VehiclePage envelope with view=page",
            body = [VehicleDto],
            headers(("X-Total-Count" = u64, description = "Total matches across all pages (view=list)"))),
        (status = 400, description = "Invalid filter, sort or page parameters", body = ErrorPayload),
        (status = 401, description = "Authentication required", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    tags = ["vehicles"],
    operation_id = "listVehicles"
)]
#[get("/vehicles")]
pub async fn list_vehicles(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    query: web::Query<ListVehiclesQuery>,
) -> ApiResult<HttpResponse> {
    let (request, view) = query.into_inner().into_request()?;
    let page = state.vehicles.list_vehicles(request).await?;
    Ok(render(page, view))
}

/// Fetch one vehicle by id.
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    params(("id" = i64, Path, description = "Positive vehicle id")),
    responses(
        (status = 200, description = "Vehicle", body = VehicleDto),
        (status = 400, description = "Malformed id", body = ErrorPayload),
        (status = 401, description = "Authentication required", body = ErrorPayload),
        (status = 404, description = "Unknown vehicle", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    tags = ["vehicles"],
    operation_id = "getVehicle"
)]
#[get("/vehicles/{id}")]
pub async fn get_vehicle(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<VehicleDto>> {
    let id: VehicleId = path
        .into_inner()
        .parse()
        .map_err(|err| Error::invalid_field("id", format!("{err}")))?;
    let vehicle = state.vehicles.get_vehicle(id).await?;
    Ok(web::Json(VehicleDto::from(&vehicle)))
}

#[cfg(test)]
mod tests {
    //! Handler tests against a mocked query port.

    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use pagination::PageRequest;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockLoginService, MockVehicleQuery};
    use crate::domain::test_fixtures::sample_vehicles;
    use crate::domain::{UserId, VehicleId};
    use crate::inbound::http::configure;
    use crate::inbound::http::session::SessionContext;
    use crate::inbound::http::test_utils::test_session_middleware;
    use crate::middleware::Trace;
    use crate::middleware::trace::TRACE_ID_HEADER;

    const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn state(vehicles: MockVehicleQuery) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(vehicles),
            Arc::new(MockLoginService::new()),
        ))
    }

    async fn call(
        vehicles: MockVehicleQuery,
        uri: &str,
        signed_in: bool,
    ) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(state(vehicles))
                .wrap(Trace)
                .wrap(test_session_middleware())
                .route(
                    "/sign-in",
                    web::get().to(|session: SessionContext| async move {
                        let id = UserId::new(USER_ID).map_err(|err| Error::internal(err.to_string()))?;
                        session.persist_user(&id)?;
                        Ok::<_, Error>(HttpResponse::Ok().finish())
                    }),
                )
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let mut request = actix_test::TestRequest::get().uri(uri);
        if signed_in {
            let res =
                actix_test::call_service(&app, actix_test::TestRequest::get().uri("/sign-in").to_request())
                    .await;
            let cookie = res
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .expect("session cookie")
                .into_owned();
            request = request.cookie(cookie);
        }
        actix_test::call_service(&app, request.to_request()).await
    }

    fn page_of_two() -> Page<Vehicle> {
        let request = PageRequest::try_new(0, 2).expect("valid request");
        Page::new(sample_vehicles().into_iter().take(2).collect(), 3, request)
    }

    #[rstest]
    fn query_defaults_follow_the_canonical_request() {
        let (request, view) = ListVehiclesQuery::default()
            .into_request()
            .expect("defaults are valid");
        assert_eq!(request.page_number, 0);
        assert_eq!(request.page_size, 10);
        assert_eq!(request.sort_by, "id");
        assert_eq!(request.sort_dir, "ASC");
        assert!(request.filter.is_unconstrained());
        assert_eq!(view, ResponseView::List);
    }

    #[rstest]
    fn malformed_parameters_are_reported_together() {
        let query = ListVehiclesQuery {
            page_number: Some("one".to_owned()),
            view: Some("table".to_owned()),
            ..ListVehiclesQuery::default()
        };
        let error = query.into_request().expect_err("malformed");
        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        let fields = error.field_errors().expect("field errors");
        assert!(fields.contains_key("pageNumber"));
        assert_eq!(
            fields.get("view").map(String::as_str),
            Some("view must be one of [list, page], got 'table'")
        );
    }

    #[rstest]
    fn dto_flattens_relations() {
        let vehicle = sample_vehicles().remove(0);
        let dto = VehicleDto::from(&vehicle);
        assert_eq!(dto.owner_name, "John Doe");
        assert_eq!(dto.maintainer_name, "Service Center A");
    }

    #[actix_web::test]
    async fn list_view_returns_array_with_total_header() {
        let mut vehicles = MockVehicleQuery::new();
        vehicles
            .expect_list_vehicles()
            .withf(|request| {
                request.page_size == 2
                    && request.sort_by == "make"
                    && request.sort_dir == "desc"
                    && request.filter.make().map(|text| text.as_str()) == Some("toy")
            })
            .times(1)
            .return_once(|_| Ok(page_of_two()));

        let res = call(
            vehicles,
            "/api/v1/vehicles?make=toy&pageSize=2&sortBy=make&sortDir=desc",
            true,
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let total = res
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        assert_eq!(total.as_deref(), Some("3"));
        let body: Vec<VehicleDto> = actix_test::read_body_json(res).await;
        let ids: Vec<i64> = body.iter().map(|dto| dto.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[actix_web::test]
    async fn page_view_returns_envelope() {
        let mut vehicles = MockVehicleQuery::new();
        vehicles
            .expect_list_vehicles()
            .return_once(|_| Ok(page_of_two()));

        let res = call(vehicles, "/api/v1/vehicles?view=page&pageSize=2", true).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(TOTAL_COUNT_HEADER).is_none());
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["totalElements"], 3);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["number"], 0);
        assert_eq!(body["size"], 2);
        assert_eq!(body["content"][1]["ownerName"], "Jane Smith");
    }

    #[rstest]
    #[case("/api/v1/vehicles?owner=John", "query")]
    #[case("/api/v1/vehicles?page=1", "query")]
    #[case("/api/v1/vehicles?pageSize=lots", "pageSize")]
    #[actix_web::test]
    async fn malformed_queries_never_reach_the_port(#[case] uri: &str, #[case] field: &str) {
        let mut vehicles = MockVehicleQuery::new();
        vehicles.expect_list_vehicles().never();

        let res = call(vehicles, uri, true).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: ErrorPayload = actix_test::read_body_json(res).await;
        assert_eq!(payload.code, ErrorCode::ValidationFailed);
        assert!(payload.errors.expect("field errors").contains_key(field));
    }

    #[actix_web::test]
    async fn listing_requires_a_session() {
        let mut vehicles = MockVehicleQuery::new();
        vehicles.expect_list_vehicles().never();

        let res = call(vehicles, "/api/v1/vehicles", false).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let payload: ErrorPayload = actix_test::read_body_json(res).await;
        assert_eq!(payload.code, ErrorCode::Unauthorized);
        assert_eq!(payload.path, "/api/v1/vehicles");
    }

    #[actix_web::test]
    async fn rejection_payload_carries_path_without_an_app_level_trace() {
        let mut vehicles = MockVehicleQuery::new();
        vehicles.expect_list_vehicles().never();
        let app = actix_test::init_service(
            App::new()
                .app_data(state(vehicles))
                .wrap(test_session_middleware())
                .service(web::scope("/api/v1").configure(configure)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/vehicles?sortBy=colour")
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let payload: ErrorPayload = actix_test::read_body_json(res).await;
        assert_eq!(payload.path, "/api/v1/vehicles");
        assert!(payload.trace_id.is_some());
        assert_eq!(payload.trace_id, header);
    }

    #[actix_web::test]
    async fn get_vehicle_renders_one_record() {
        let mut vehicles = MockVehicleQuery::new();
        vehicles
            .expect_get_vehicle()
            .withf(|id| *id == VehicleId::new(2).expect("positive"))
            .return_once(|_| Ok(sample_vehicles().remove(1)));

        let res = call(vehicles, "/api/v1/vehicles/2", true).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: VehicleDto = actix_test::read_body_json(res).await;
        assert_eq!(body.make, "Honda");
        assert_eq!(body.model, "Civic");
    }

    #[rstest]
    #[case("abc")]
    #[case("0")]
    #[case("-4")]
    #[actix_web::test]
    async fn get_vehicle_rejects_malformed_ids(#[case] raw: &str) {
        let mut vehicles = MockVehicleQuery::new();
        vehicles.expect_get_vehicle().never();

        let res = call(vehicles, &format!("/api/v1/vehicles/{raw}"), true).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: ErrorPayload = actix_test::read_body_json(res).await;
        assert_eq!(payload.code, ErrorCode::ValidationFailed);
        assert!(payload.errors.expect("field errors").contains_key("id"));
    }

    #[actix_web::test]
    async fn get_vehicle_surfaces_not_found() {
        let mut vehicles = MockVehicleQuery::new();
        vehicles
            .expect_get_vehicle()
            .return_once(|_| Err(Error::not_found("Vehicle with id 9 not found")));

        let res = call(vehicles, "/api/v1/vehicles/9", true).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let payload: ErrorPayload = actix_test::read_body_json(res).await;
        assert_eq!(payload.message, "Vehicle with id 9 not found");
    }
}

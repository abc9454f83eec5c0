//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while rendering every
//! failure, including framework extractor failures, as one JSON
//! [`ErrorPayload`] with a status derived from its [`ErrorCode`].

use std::collections::BTreeMap;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::{RequestContext, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned in place of internal error details.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// Failure body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    /// Numeric HTTP status.
    #[schema(example = 400)]
    pub status: u16,
    /// Stable machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable description.
    #[schema(example = "Invalid sort direction 'up'. Allowed values are: [ASC, DESC].")]
    pub message: String,
    /// Request path that produced the failure.
    #[schema(example = "/api/v1/vehicles")]
    pub path: String,
    /// Per-field messages for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
    /// Structured guidance such as the rejected value and allowed values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    /// Correlation identifier, mirrored in the `trace-id` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Stateless mapping from domain errors to HTTP responses.
pub struct ErrorTranslator;

impl ErrorTranslator {
    /// HTTP status for an error code.
    pub const fn status_for(code: ErrorCode) -> StatusCode {
        match code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidSortField
            | ErrorCode::InvalidSortDirection
            | ErrorCode::InvalidPageNumber
            | ErrorCode::InvalidPageSize
            | ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the client payload. Internal errors keep only their trace id.
    ///
    /// # Examples
    /// ```
    /// use vehicle_catalogue::domain::Error;
    /// use vehicle_catalogue::inbound::http::error::ErrorTranslator;
    ///
    /// let payload = ErrorTranslator::translate(&Error::internal("db down"), "/api/v1/vehicles");
    /// assert_eq!(payload.status, 500);
    /// assert_eq!(payload.message, "Internal server error");
    /// ```
    pub fn translate(error: &Error, path: &str) -> ErrorPayload {
        let status = Self::status_for(error.code()).as_u16();
        let trace_id = error.trace_id().map(str::to_owned);
        if matches!(error.code(), ErrorCode::InternalError) {
            return ErrorPayload {
                status,
                code: ErrorCode::InternalError,
                message: REDACTED_MESSAGE.to_owned(),
                path: path.to_owned(),
                errors: None,
                details: None,
                trace_id,
            };
        }
        ErrorPayload {
            status,
            code: error.code(),
            message: error.message().to_owned(),
            path: path.to_owned(),
            errors: error.field_errors().cloned(),
            details: error.details().cloned(),
            trace_id,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        ErrorTranslator::status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let path = RequestContext::current_path().unwrap_or_default();
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(code = %self.code(), message = self.message(), %path, "request failed");
        } else {
            warn!(code = %self.code(), message = self.message(), %path, "request rejected");
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorTranslator::translate(self, &path))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

/// `QueryConfig` error handler: malformed or unknown query parameters.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_field("query", err.to_string()).into()
}

/// `JsonConfig` error handler: unreadable request bodies.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_field("body", err.to_string()).into()
}

/// `PathConfig` error handler: path segments that fail to deserialise.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_field("path", err.to_string()).into()
}

/// Default service for unmatched routes.
pub async fn route_not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!("No route for {} {}", req.method(), req.path())))
}

//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::middleware::trace::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The requested resource does not exist.
    NotFound,
    /// The sort field is not part of the allow-list.
    InvalidSortField,
    /// The sort direction is neither `ASC` nor `DESC`.
    InvalidSortDirection,
    /// The page index is negative or addresses beyond the offset range.
    InvalidPageNumber,
    /// The page size is below one or above the configured cap.
    InvalidPageSize,
    /// One or more request fields are malformed.
    ValidationFailed,
    /// Authentication failed or is missing.
    Unauthorized,
    /// An unexpected error occurred inside the service.
    InternalError,
}

impl ErrorCode {
    /// Snake-case token used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidSortField => "invalid_sort_field",
            Self::InvalidSortDirection => "invalid_sort_direction",
            Self::InvalidPageNumber => "invalid_page_number",
            Self::InvalidPageSize => "invalid_page_size",
            Self::ValidationFailed => "validation_failed",
            Self::Unauthorized => "unauthorized",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error value.
///
/// Carries a stable [`ErrorCode`], a human-readable message, an optional map of
/// per-field messages and optional structured details. The trace identifier of
/// the active request is captured at construction.
///
/// # Examples
/// ```
/// use vehicle_catalogue::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Vehicle with id 7 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.field_errors().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    field_errors: Option<BTreeMap<String, String>>,
    details: Option<Value>,
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error, capturing the current trace identifier if one is
    /// in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field_errors: None,
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Per-field messages, keyed by request field name.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        self.field_errors.as_ref()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Correlation identifier of the request that raised the error.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use vehicle_catalogue::domain::{Error, ErrorCode};
    /// use serde_json::json;
    ///
    /// let err = Error::new(ErrorCode::InvalidSortField, "bad")
    ///     .with_details(json!({ "value": "colour" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach per-field messages. An empty map clears them.
    pub fn with_field_errors(mut self, errors: BTreeMap<String, String>) -> Self {
        self.field_errors = (!errors.is_empty()).then_some(errors);
        self
    }

    /// Attach a trace identifier explicitly.
    #[cfg(test)]
    pub(crate) fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// [`ErrorCode::ValidationFailed`] carrying one message per offending
    /// field.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeMap;
    /// use vehicle_catalogue::domain::{Error, ErrorCode};
    ///
    /// let errors = BTreeMap::from([("email".to_owned(), "Email is required".to_owned())]);
    /// let err = Error::validation_failed(errors);
    /// assert_eq!(err.code(), ErrorCode::ValidationFailed);
    /// assert_eq!(err.message(), "Validation error");
    /// ```
    pub fn validation_failed(errors: BTreeMap<String, String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, "Validation error").with_field_errors(errors)
    }

    /// [`ErrorCode::ValidationFailed`] for a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation_failed(BTreeMap::from([(field.into(), message.into())]))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;

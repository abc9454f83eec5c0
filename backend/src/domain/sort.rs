//! Sort allow-list validation.
//!
//! Sort keys come straight from request parameters, so they are checked
//! against a closed set before anything reaches storage. Each accepted key
//! resolves to a fixed [`AttributePath`]; no other attribute can ever be
//! ordered on.

use std::cmp::Ordering;
use std::fmt;

use serde_json::json;

use super::Vehicle;
use super::error::{Error, ErrorCode};
use super::predicate::{AttributePath, Relation};

/// Sort key accepted by the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    Id,
    Make,
    Model,
    OwnerName,
    MaintainerName,
}

impl SortField {
    /// Every accepted key, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Id,
        Self::Make,
        Self::Model,
        Self::OwnerName,
        Self::MaintainerName,
    ];

    /// Canonical spelling, matched case-sensitively.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Make => "make",
            Self::Model => "model",
            Self::OwnerName => "ownerName",
            Self::MaintainerName => "maintainerName",
        }
    }

    /// Exact lookup of a canonical spelling.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == value)
    }

    /// Storage attribute ordered by this key.
    pub const fn path(self) -> AttributePath {
        match self {
            Self::Id => AttributePath::vehicle("id"),
            Self::Make => AttributePath::vehicle("make"),
            Self::Model => AttributePath::vehicle("model"),
            Self::OwnerName => AttributePath::related(Relation::Owner, "name"),
            Self::MaintainerName => AttributePath::related(Relation::Maintainer, "name"),
        }
    }

    fn compare(self, left: &Vehicle, right: &Vehicle) -> Ordering {
        match self {
            Self::Id => left.id().cmp(&right.id()),
            Self::Make => left.make().cmp(right.make()),
            Self::Model => left.model().cmp(right.model()),
            Self::OwnerName => left.owner().name().cmp(right.owner().name()),
            Self::MaintainerName => left.maintainer().name().cmp(right.maintainer().name()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub const ALL: [Self; 2] = [Self::Ascending, Self::Descending];

    /// Wire token, `ASC` or `DESC`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// Case-insensitive lookup of `ASC` or `DESC`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.token().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Validated sort order.
///
/// Ascending identity is always applied after the primary key so that equal
/// keys order deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortDescriptor {
    field: SortField,
    direction: SortDirection,
}

impl SortDescriptor {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub const fn field(&self) -> SortField {
        self.field
    }

    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Total order over in-memory records, including the identity tie-break.
    pub fn compare(&self, left: &Vehicle, right: &Vehicle) -> Ordering {
        let primary = self.field.compare(left, right);
        let primary = match self.direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        primary.then_with(|| left.id().cmp(&right.id()))
    }
}

/// Rejected sort input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("Invalid sort field '{value}'. Allowed values are: [{}].", allowed_fields().join(", "))]
    InvalidField { value: String },
    #[error("Invalid sort direction '{value}'. Allowed values are: [{}].", allowed_directions().join(", "))]
    InvalidDirection { value: String },
}

fn allowed_fields() -> Vec<&'static str> {
    SortField::ALL.into_iter().map(SortField::as_str).collect()
}

fn allowed_directions() -> Vec<&'static str> {
    SortDirection::ALL
        .into_iter()
        .map(SortDirection::token)
        .collect()
}

impl From<SortError> for Error {
    fn from(value: SortError) -> Self {
        let message = value.to_string();
        match value {
            SortError::InvalidField { value } => Error::new(ErrorCode::InvalidSortField, message)
                .with_details(json!({
                    "value": value,
                    "allowedValues": allowed_fields(),
                })),
            SortError::InvalidDirection { value } => {
                Error::new(ErrorCode::InvalidSortDirection, message).with_details(json!({
                    "value": value,
                    "allowedValues": allowed_directions(),
                }))
            }
        }
    }
}

/// Allow-list check for sort parameters.
pub struct SortValidator;

impl SortValidator {
    /// Validate a raw field and direction.
    ///
    /// Both inputs are checked; when both are invalid the field error wins.
    ///
    /// # Examples
    /// ```
    /// use vehicle_catalogue::domain::sort::{SortDirection, SortField, SortValidator};
    ///
    /// let sort = SortValidator::validate("ownerName", "desc").expect("valid sort");
    /// assert_eq!(sort.field(), SortField::OwnerName);
    /// assert_eq!(sort.direction(), SortDirection::Descending);
    /// assert!(SortValidator::validate("OwnerName", "ASC").is_err());
    /// ```
    pub fn validate(field: &str, direction: &str) -> Result<SortDescriptor, SortError> {
        let parsed_field = SortField::parse(field);
        let parsed_direction = SortDirection::parse(direction);
        match (parsed_field, parsed_direction) {
            (Some(field), Some(direction)) => Ok(SortDescriptor::new(field, direction)),
            (None, _) => Err(SortError::InvalidField {
                value: field.to_owned(),
            }),
            (Some(_), None) => Err(SortError::InvalidDirection {
                value: direction.to_owned(),
            }),
        }
    }
}

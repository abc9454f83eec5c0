//! Read-only vehicle records and their related parties.
//!
//! A [`Vehicle`] references exactly one owning [`Customer`] and one
//! [`Maintainer`], and carries its service history in the order storage
//! returned it.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Validation errors raised when constructing vehicle identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VehicleIdError {
    /// The identifier was zero or negative.
    #[error("vehicle id must be a positive integer, got {value}")]
    NotPositive { value: i64 },
    /// The identifier could not be parsed as an integer.
    #[error("vehicle id must be a positive integer, got '{value}'")]
    Malformed { value: String },
}

/// Positive 64-bit vehicle identity.
///
/// # Examples
/// ```
/// use vehicle_catalogue::domain::VehicleId;
///
/// let id: VehicleId = "7".parse().expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(VehicleId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(i64);

impl VehicleId {
    /// Validate a raw identifier.
    pub fn new(value: i64) -> Result<Self, VehicleIdError> {
        if value < 1 {
            return Err(VehicleIdError::NotPositive { value });
        }
        Ok(Self(value))
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VehicleId {
    type Err = VehicleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<i64>().map_err(|_| VehicleIdError::Malformed {
            value: s.to_owned(),
        })?;
        Self::new(value)
    }
}

/// Vehicle owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: i64,
    name: String,
}

impl Customer {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Service provider responsible for a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maintainer {
    id: i64,
    name: String,
}

impl Maintainer {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// One entry of a vehicle's service history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    id: i64,
    description: String,
    performed_on: NaiveDate,
}

impl ServiceRecord {
    pub fn new(id: i64, description: impl Into<String>, performed_on: NaiveDate) -> Self {
        Self {
            id,
            description: description.into(),
            performed_on,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn performed_on(&self) -> NaiveDate {
        self.performed_on
    }
}

/// Input payload for [`Vehicle::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDraft {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub owner: Customer,
    pub maintainer: Maintainer,
    pub services: Vec<ServiceRecord>,
}

/// Catalogue vehicle record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: VehicleId,
    make: String,
    model: String,
    owner: Customer,
    maintainer: Maintainer,
    services: Vec<ServiceRecord>,
}

impl Vehicle {
    pub fn new(draft: VehicleDraft) -> Self {
        let VehicleDraft {
            id,
            make,
            model,
            owner,
            maintainer,
            services,
        } = draft;
        Self {
            id,
            make,
            model,
            owner,
            maintainer,
            services,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn make(&self) -> &str {
        self.make.as_str()
    }

    pub fn model(&self) -> &str {
        self.model.as_str()
    }

    pub fn owner(&self) -> &Customer {
        &self.owner
    }

    pub fn maintainer(&self) -> &Maintainer {
        &self.maintainer
    }

    pub fn services(&self) -> &[ServiceRecord] {
        &self.services
    }
}

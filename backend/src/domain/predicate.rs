//! Composable filter predicates over vehicle records.
//!
//! [`compose`] turns a [`VehicleFilter`] into one [`Predicate`] by ANDing a
//! containment test per present field. [`Predicate::Always`] is the identity of
//! the conjunction and nested conjunctions flatten, so composition order never
//! changes the matched set.
//!
//! Predicates are evaluated in memory with [`Predicate::matches`]; storage
//! adapters walk [`Predicate::conditions`] and translate each
//! [`AttributePath`] into their own query language.

use super::{FilterText, Vehicle, VehicleFilter};

/// Related entity reached from a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The owning customer.
    Owner,
    /// The responsible maintainer.
    Maintainer,
}

/// Storage attribute addressed by a filter or sort key.
///
/// `relation == None` means the column lives on the vehicle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributePath {
    pub relation: Option<Relation>,
    pub column: &'static str,
}

impl AttributePath {
    pub const fn vehicle(column: &'static str) -> Self {
        Self {
            relation: None,
            column,
        }
    }

    pub const fn related(relation: Relation, column: &'static str) -> Self {
        Self {
            relation: Some(relation),
            column,
        }
    }
}

/// Text attribute a filter can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Make,
    Model,
    OwnerName,
    MaintainerName,
}

impl FilterField {
    /// Resolve the attribute compared by this field.
    pub const fn path(self) -> AttributePath {
        match self {
            Self::Make => AttributePath::vehicle("make"),
            Self::Model => AttributePath::vehicle("model"),
            Self::OwnerName => AttributePath::related(Relation::Owner, "name"),
            Self::MaintainerName => AttributePath::related(Relation::Maintainer, "name"),
        }
    }

    /// Read the attribute value from an in-memory record.
    pub fn value_of(self, vehicle: &Vehicle) -> &str {
        match self {
            Self::Make => vehicle.make(),
            Self::Model => vehicle.model(),
            Self::OwnerName => vehicle.owner().name(),
            Self::MaintainerName => vehicle.maintainer().name(),
        }
    }
}

/// Boolean test over a vehicle record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Matches every record.
    Always,
    /// Case-insensitive substring containment on one attribute.
    Contains { field: FilterField, text: FilterText },
    /// Conjunction of at least two non-`Always`, non-`All` predicates.
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn contains(field: FilterField, text: FilterText) -> Self {
        Self::Contains { field, text }
    }

    /// Logical AND.
    ///
    /// # Examples
    /// ```
    /// use vehicle_catalogue::domain::FilterText;
    /// use vehicle_catalogue::domain::predicate::{FilterField, Predicate};
    ///
    /// let make = Predicate::contains(FilterField::Make, FilterText::new("toy").unwrap());
    /// assert_eq!(Predicate::Always.and(make.clone()), make);
    /// ```
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Always, other) => other,
            (this, Self::Always) => this,
            (Self::All(mut left), Self::All(right)) => {
                left.extend(right);
                Self::All(left)
            }
            (Self::All(mut left), other) => {
                left.push(other);
                Self::All(left)
            }
            (this, Self::All(mut right)) => {
                right.insert(0, this);
                Self::All(right)
            }
            (this, other) => Self::All(vec![this, other]),
        }
    }

    /// Whether this predicate matches every record.
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Evaluate against a record.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        match self {
            Self::Always => true,
            Self::Contains { field, text } => text.matches(field.value_of(vehicle)),
            Self::All(parts) => parts.iter().all(|part| part.matches(vehicle)),
        }
    }

    /// Flattened list of containment conditions, all of which must hold.
    pub fn conditions(&self) -> Vec<(FilterField, &FilterText)> {
        match self {
            Self::Always => Vec::new(),
            Self::Contains { field, text } => vec![(*field, text)],
            Self::All(parts) => parts.iter().flat_map(Self::conditions).collect(),
        }
    }
}

/// Build the composite predicate for a filter. Pure and infallible.
///
/// # Examples
/// ```
/// use vehicle_catalogue::domain::VehicleFilter;
/// use vehicle_catalogue::domain::predicate::{compose, Predicate};
///
/// assert_eq!(compose(&VehicleFilter::default()), Predicate::Always);
/// let composed = compose(&VehicleFilter::default().with_make("toy").with_model("cor"));
/// assert_eq!(composed.conditions().len(), 2);
/// ```
pub fn compose(filter: &VehicleFilter) -> Predicate {
    [
        (FilterField::Make, filter.make()),
        (FilterField::Model, filter.model()),
        (FilterField::OwnerName, filter.owner_name()),
        (FilterField::MaintainerName, filter.maintainer_name()),
    ]
    .into_iter()
    .map(|(field, text)| {
        text.map_or(Predicate::Always, |text| {
            Predicate::contains(field, text.clone())
        })
    })
    .fold(Predicate::Always, Predicate::and)
}

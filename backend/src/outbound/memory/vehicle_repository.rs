//! In-memory implementation of [`VehicleRepository`].
//!
//! Evaluates predicates with [`Predicate::matches`] and orders with
//! [`SortDescriptor::compare`]. Filtering matches the SQL adapter exactly.
//! Text sort keys compare by code point, as `str` does, which is the order
//! PostgreSQL produces under the `C` collation; other collations may place
//! mixed-case values differently.
//!
//! [`Predicate::matches`]: crate::domain::predicate::Predicate::matches
//! [`SortDescriptor::compare`]: crate::domain::sort::SortDescriptor::compare

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::ports::{
    VehicleQuerySpec, VehicleRepository, VehicleRepositoryError, VehicleSlice,
};
use crate::domain::{
    Customer, Maintainer, ServiceRecord, Vehicle, VehicleDraft, VehicleId, VehicleIdError,
};

/// Errors raised while building the demo catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DemoDataError {
    /// A seed record carried a non-positive id.
    #[error(transparent)]
    Id(#[from] VehicleIdError),
    /// A seed service record carried an impossible calendar date.
    #[error("invalid service date {year:04}-{month:02}-{day:02}")]
    Date { year: i32, month: u32, day: u32 },
}

/// Vehicle records held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryVehicleRepository {
    records: RwLock<Vec<Vehicle>>,
}

impl InMemoryVehicleRepository {
    pub fn new(records: Vec<Vehicle>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Repository seeded with the demo catalogue.
    pub fn demo() -> Result<Self, DemoDataError> {
        Ok(Self::new(demo_vehicles()?))
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, Vec<Vehicle>>, VehicleRepositoryError> {
        self.records
            .read()
            .map_err(|_| VehicleRepositoryError::connection("vehicle store lock poisoned"))
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn find_page(
        &self,
        spec: &VehicleQuerySpec,
    ) -> Result<VehicleSlice, VehicleRepositoryError> {
        let records = self.read()?;
        let mut matches: Vec<&Vehicle> = records
            .iter()
            .filter(|vehicle| spec.predicate.matches(vehicle))
            .collect();
        let sort = spec.page.sort();
        matches.sort_by(|left, right| sort.compare(left, right));

        let total = u64::try_from(matches.len())
            .map_err(|err| VehicleRepositoryError::query(err.to_string()))?;
        let offset = usize::try_from(spec.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(spec.page.limit()).unwrap_or(usize::MAX);
        let items = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(VehicleSlice { items, total })
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, VehicleRepositoryError> {
        let records = self.read()?;
        Ok(records.iter().find(|vehicle| vehicle.id() == id).cloned())
    }
}

fn service(
    id: i64,
    description: &str,
    (year, month, day): (i32, u32, u32),
) -> Result<ServiceRecord, DemoDataError> {
    let performed_on = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DemoDataError::Date { year, month, day })?;
    Ok(ServiceRecord::new(id, description, performed_on))
}

/// Demo catalogue: three vehicles across two owners and two maintainers.
pub fn demo_vehicles() -> Result<Vec<Vehicle>, DemoDataError> {
    let john = Customer::new(1, "John Doe");
    let jane = Customer::new(2, "Jane Smith");
    let center_a = Maintainer::new(1, "Service Center A");
    let center_b = Maintainer::new(2, "Service Center B");

    Ok(vec![
        Vehicle::new(VehicleDraft {
            id: VehicleId::new(1)?,
            make: "Toyota".to_owned(),
            model: "Camry".to_owned(),
            owner: john,
            maintainer: center_a.clone(),
            services: vec![
                service(1, "Oil change", (2024, 1, 15))?,
                service(2, "Tire rotation", (2024, 6, 2))?,
            ],
        }),
        Vehicle::new(VehicleDraft {
            id: VehicleId::new(2)?,
            make: "Honda".to_owned(),
            model: "Civic".to_owned(),
            owner: jane.clone(),
            maintainer: center_b,
            services: vec![service(3, "Brake inspection", (2024, 3, 9))?],
        }),
        Vehicle::new(VehicleDraft {
            id: VehicleId::new(3)?,
            make: "Toyota".to_owned(),
            model: "Corolla".to_owned(),
            owner: jane,
            maintainer: center_a,
            services: Vec::new(),
        }),
    ])
}

//! Row structs for reading the vehicle schema.
//!
//! Internal to the persistence adapter; conversion into domain types lives in
//! [`VehicleRows::into_vehicle`].

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{
    Customer, Maintainer, ServiceRecord, Vehicle, VehicleDraft, VehicleId, VehicleIdError,
};

use super::schema::{customers, maintainers, service_records, vehicles};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vehicles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VehicleRow {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub owner_id: i64,
    pub maintainer_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = maintainers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MaintainerRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = service_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ServiceRecordRow {
    pub id: i64,
    pub vehicle_id: i64,
    pub description: String,
    pub performed_on: NaiveDate,
}

/// One joined vehicle row.
pub(crate) type VehicleRows = (VehicleRow, CustomerRow, MaintainerRow);

pub(crate) trait IntoVehicle {
    fn into_vehicle(self, services: Vec<ServiceRecordRow>) -> Result<Vehicle, VehicleIdError>;
}

impl IntoVehicle for VehicleRows {
    fn into_vehicle(self, services: Vec<ServiceRecordRow>) -> Result<Vehicle, VehicleIdError> {
        let (vehicle, owner, maintainer) = self;
        Ok(Vehicle::new(VehicleDraft {
            id: VehicleId::new(vehicle.id)?,
            make: vehicle.make,
            model: vehicle.model,
            owner: Customer::new(owner.id, owner.name),
            maintainer: Maintainer::new(maintainer.id, maintainer.name),
            services: services
                .into_iter()
                .map(|row| ServiceRecord::new(row.id, row.description, row.performed_on))
                .collect(),
        }))
    }
}

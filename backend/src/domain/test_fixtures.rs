//! Shared vehicle records for domain unit tests.

use chrono::NaiveDate;

use super::{Customer, Maintainer, ServiceRecord, Vehicle, VehicleDraft, VehicleId};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub(crate) fn vehicle(id: i64, make: &str, model: &str, owner: &str, maintainer: &str) -> Vehicle {
    Vehicle::new(VehicleDraft {
        id: VehicleId::new(id).expect("positive id"),
        make: make.to_owned(),
        model: model.to_owned(),
        owner: Customer::new(id * 10, owner),
        maintainer: Maintainer::new(id * 100, maintainer),
        services: vec![ServiceRecord::new(id, "Oil change", date(2024, 1, 15))],
    })
}

/// Toyota Camry, Honda Civic and Toyota Corolla with their owners and
/// maintainers.
pub(crate) fn sample_vehicles() -> Vec<Vehicle> {
    vec![
        vehicle(1, "Toyota", "Camry", "John Doe", "Service Center A"),
        vehicle(2, "Honda", "Civic", "Jane Smith", "Service Center B"),
        vehicle(3, "Toyota", "Corolla", "Jane Smith", "Service Center A"),
    ]
}

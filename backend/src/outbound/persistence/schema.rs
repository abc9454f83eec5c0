//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// Vehicle owners.
    customers (id) {
        id -> Int8,
        /// Display name matched by the `ownerName` filter.
        name -> Varchar,
    }
}

diesel::table! {
    /// Service providers.
    maintainers (id) {
        id -> Int8,
        /// Display name matched by the `maintainerName` filter.
        name -> Varchar,
    }
}

diesel::table! {
    /// Catalogue vehicles.
    vehicles (id) {
        /// Positive identity; the final ordering tie-break.
        id -> Int8,
        make -> Varchar,
        model -> Varchar,
        /// Foreign key to `customers.id`.
        owner_id -> Int8,
        /// Foreign key to `maintainers.id`.
        maintainer_id -> Int8,
    }
}

diesel::table! {
    /// Service history entries.
    service_records (id) {
        id -> Int8,
        /// Foreign key to `vehicles.id`.
        vehicle_id -> Int8,
        description -> Text,
        performed_on -> Date,
    }
}

diesel::joinable!(vehicles -> customers (owner_id));
diesel::joinable!(vehicles -> maintainers (maintainer_id));
diesel::joinable!(service_records -> vehicles (vehicle_id));

diesel::allow_tables_to_appear_in_same_query!(customers, maintainers, service_records, vehicles,);

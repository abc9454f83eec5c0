//! PostgreSQL-backed `VehicleRepository` implementation using Diesel ORM.
//!
//! Listing runs two statements over the same filtered join: a `COUNT(*)` for
//! the total and an ordered, offset/limited select for the slice. Service
//! history for the slice is then loaded in one `IN` query.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    VehicleQuerySpec, VehicleRepository, VehicleRepositoryError, VehicleSlice,
};
use crate::domain::predicate::{FilterField, Predicate};
use crate::domain::sort::{SortDescriptor, SortDirection, SortField};
use crate::domain::{Vehicle, VehicleId};

use super::diesel_helpers::{contains_pattern, map_diesel_error, map_pool_error};
use super::models::{
    CustomerRow, IntoVehicle, MaintainerRow, ServiceRecordRow, VehicleRow, VehicleRows,
};
use super::pool::DbPool;
use super::schema::{customers, maintainers, service_records, vehicles};

type VehicleJoin = diesel::dsl::InnerJoin<
    diesel::dsl::InnerJoin<vehicles::table, customers::table>,
    maintainers::table,
>;
type BoxedVehicleQuery = diesel::dsl::IntoBoxed<'static, VehicleJoin, Pg>;

/// Diesel-backed implementation of the vehicle repository port.
#[derive(Clone)]
pub struct DieselVehicleRepository {
    pool: DbPool,
}

impl DieselVehicleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn joined() -> BoxedVehicleQuery {
    vehicles::table
        .inner_join(customers::table)
        .inner_join(maintainers::table)
        .into_boxed()
}

fn filtered(predicate: &Predicate) -> BoxedVehicleQuery {
    if predicate.is_always() {
        return joined();
    }
    predicate
        .conditions()
        .into_iter()
        .fold(joined(), |query, (field, text)| {
            let pattern = contains_pattern(text.needle());
            match field {
                FilterField::Make => query.filter(vehicles::make.ilike(pattern)),
                FilterField::Model => query.filter(vehicles::model.ilike(pattern)),
                FilterField::OwnerName => query.filter(customers::name.ilike(pattern)),
                FilterField::MaintainerName => query.filter(maintainers::name.ilike(pattern)),
            }
        })
}

fn ordered(query: BoxedVehicleQuery, sort: &SortDescriptor) -> BoxedVehicleQuery {
    let query = match (sort.field(), sort.direction()) {
        (SortField::Id, SortDirection::Ascending) => query.order_by(vehicles::id.asc()),
        (SortField::Id, SortDirection::Descending) => query.order_by(vehicles::id.desc()),
        (SortField::Make, SortDirection::Ascending) => query.order_by(vehicles::make.asc()),
        (SortField::Make, SortDirection::Descending) => query.order_by(vehicles::make.desc()),
        (SortField::Model, SortDirection::Ascending) => query.order_by(vehicles::model.asc()),
        (SortField::Model, SortDirection::Descending) => query.order_by(vehicles::model.desc()),
        (SortField::OwnerName, SortDirection::Ascending) => query.order_by(customers::name.asc()),
        (SortField::OwnerName, SortDirection::Descending) => {
            query.order_by(customers::name.desc())
        }
        (SortField::MaintainerName, SortDirection::Ascending) => {
            query.order_by(maintainers::name.asc())
        }
        (SortField::MaintainerName, SortDirection::Descending) => {
            query.order_by(maintainers::name.desc())
        }
    };
    query.then_order_by(vehicles::id.asc())
}

fn to_sql_bound(value: u64) -> Result<i64, VehicleRepositoryError> {
    i64::try_from(value)
        .map_err(|_| VehicleRepositoryError::query(format!("page bound {value} exceeds i64")))
}

fn row_error(error: impl std::fmt::Display) -> VehicleRepositoryError {
    VehicleRepositoryError::query(format!("invalid vehicle row: {error}"))
}

impl DieselVehicleRepository {
    async fn attach_services(
        &self,
        rows: Vec<VehicleRows>,
    ) -> Result<Vec<Vehicle>, VehicleRepositoryError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|(vehicle, _, _)| vehicle.id).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let service_rows: Vec<ServiceRecordRow> = service_records::table
            .filter(service_records::vehicle_id.eq_any(ids))
            .order_by((
                service_records::vehicle_id.asc(),
                service_records::performed_on.asc(),
                service_records::id.asc(),
            ))
            .select(ServiceRecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut by_vehicle: HashMap<i64, Vec<ServiceRecordRow>> = HashMap::new();
        for row in service_rows {
            by_vehicle.entry(row.vehicle_id).or_default().push(row);
        }

        rows.into_iter()
            .map(|joined| {
                let services = by_vehicle.remove(&joined.0.id).unwrap_or_default();
                joined.into_vehicle(services).map_err(row_error)
            })
            .collect()
    }
}

#[async_trait]
impl VehicleRepository for DieselVehicleRepository {
    async fn find_page(
        &self,
        spec: &VehicleQuerySpec,
    ) -> Result<VehicleSlice, VehicleRepositoryError> {
        let offset = to_sql_bound(spec.page.offset())?;
        let limit = to_sql_bound(spec.page.limit())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(&spec.predicate)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<VehicleRows> = ordered(filtered(&spec.predicate), spec.page.sort())
            .select((
                VehicleRow::as_select(),
                CustomerRow::as_select(),
                MaintainerRow::as_select(),
            ))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        drop(conn);

        debug!(total, returned = rows.len(), offset, limit, "vehicle page loaded");
        let items = self.attach_services(rows).await?;
        let total = u64::try_from(total).map_err(row_error)?;
        Ok(VehicleSlice { items, total })
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, VehicleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<VehicleRows> = joined()
            .filter(vehicles::id.eq(id.get()))
            .select((
                VehicleRow::as_select(),
                CustomerRow::as_select(),
                MaintainerRow::as_select(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        drop(conn);

        match row {
            Some(row) => Ok(self.attach_services(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleFilter;
    use crate::domain::predicate::compose;
    use diesel::debug_query;
    use rstest::rstest;

    fn sql(query: BoxedVehicleQuery) -> String {
        debug_query::<Pg, _>(&query).to_string()
    }

    #[rstest]
    fn unconstrained_filters_add_no_where_clause() {
        let rendered = sql(filtered(&Predicate::Always));
        assert!(!rendered.contains("WHERE"), "unexpected filter: {rendered}");
    }

    #[rstest]
    fn filters_use_ilike_on_resolved_columns() {
        let predicate = compose(
            &VehicleFilter::default()
                .with_make("50%")
                .with_owner_name("Jane"),
        );
        let rendered = sql(filtered(&predicate));
        assert!(rendered.contains("\"vehicles\".\"make\" ILIKE"), "{rendered}");
        assert!(rendered.contains("\"customers\".\"name\" ILIKE"), "{rendered}");
        assert!(rendered.contains("%50\\\\%%"), "{rendered}");
        assert!(rendered.contains("%jane%"), "{rendered}");
    }

    #[rstest]
    #[case(SortField::OwnerName, SortDirection::Descending, "\"customers\".\"name\" DESC")]
    #[case(SortField::MaintainerName, SortDirection::Ascending, "\"maintainers\".\"name\" ASC")]
    #[case(SortField::Make, SortDirection::Ascending, "\"vehicles\".\"make\" ASC")]
    fn ordering_ends_with_ascending_id(
        #[case] field: SortField,
        #[case] direction: SortDirection,
        #[case] primary: &str,
    ) {
        let rendered = sql(ordered(joined(), &SortDescriptor::new(field, direction)));
        let expected = format!("ORDER BY {primary}, \"vehicles\".\"id\" ASC");
        assert!(rendered.contains(&expected), "{rendered}");
    }
}

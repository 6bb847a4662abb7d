//! PostgreSQL-backed `ZoneRepository` implementation using Diesel ORM.
//!
//! Read and create only; the `available_spots` counter is written exclusively
//! by [`DieselInventoryLedger`](super::DieselInventoryLedger).

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ZoneRepository, ZoneRepositoryError};
use crate::domain::{ParkingZone, ZoneId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewZoneRow, ZoneRow};
use super::pool::{DbPool, PoolError};
use super::schema::parking_zones;

/// Diesel-backed implementation of the zone repository port.
#[derive(Clone)]
pub struct DieselZoneRepository {
    pool: DbPool,
}

impl DieselZoneRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ZoneRepositoryError {
    map_pool_error(error, ZoneRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ZoneRepositoryError {
    map_diesel_error(
        error,
        ZoneRepositoryError::query,
        ZoneRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain zone.
fn row_to_zone(row: ZoneRow) -> Result<ParkingZone, ZoneRepositoryError> {
    ParkingZone::new(
        ZoneId::from_uuid(row.id),
        row.name,
        row.location,
        row.total_spots,
        row.available_spots,
    )
    .map_err(|err| ZoneRepositoryError::query(err.to_string()))
}

#[async_trait]
impl ZoneRepository for DieselZoneRepository {
    async fn insert(&self, zone: &ParkingZone) -> Result<(), ZoneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewZoneRow {
            id: *zone.id().as_uuid(),
            name: zone.name(),
            location: zone.location(),
            total_spots: zone.total_spots(),
            available_spots: zone.available_spots(),
        };

        diesel::insert_into(parking_zones::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_by_id(
        &self,
        zone_id: ZoneId,
    ) -> Result<Option<ParkingZone>, ZoneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = parking_zones::table
            .filter(parking_zones::id.eq(zone_id.as_uuid()))
            .select(ZoneRow::as_select())
            .first::<ZoneRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_zone).transpose()
    }

    async fn list(&self) -> Result<Vec<ParkingZone>, ZoneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ZoneRow> = parking_zones::table
            .order(parking_zones::name.asc())
            .select(ZoneRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_zone).collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn rows_rehydrate_into_domain_zones() {
        let id = uuid::Uuid::new_v4();
        let zone = row_to_zone(ZoneRow {
            id,
            name: "North Quay".to_owned(),
            location: "Quay Street".to_owned(),
            total_spots: 8,
            available_spots: 3,
        })
        .expect("valid row");

        assert_eq!(zone.id(), ZoneId::from_uuid(id));
        assert_eq!(zone.available_spots(), 3);
    }

    #[rstest]
    fn rows_with_impossible_counters_surface_as_query_errors() {
        let result = row_to_zone(ZoneRow {
            id: uuid::Uuid::new_v4(),
            name: "North Quay".to_owned(),
            location: "Quay Street".to_owned(),
            total_spots: 8,
            available_spots: 9,
        });

        assert!(matches!(result, Err(ZoneRepositoryError::Query { .. })));
    }
}

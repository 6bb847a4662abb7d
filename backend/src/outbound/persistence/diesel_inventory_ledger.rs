//! PostgreSQL-backed `InventoryLedger` implementation using Diesel ORM.
//!
//! Each counter mutation is a single guarded `UPDATE`, so concurrent callers
//! serialise on the zone row and a zone with one free spot grants exactly one
//! reservation. `transfer` wraps both mutations in a transaction; a failed
//! release rolls back the reservation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{InventoryError, InventoryLedger};
use crate::domain::ZoneId;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::parking_zones;

/// Diesel-backed implementation of the inventory ledger port.
#[derive(Clone)]
pub struct DieselInventoryLedger {
    pool: DbPool,
}

impl DieselInventoryLedger {
    /// Create a new ledger with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> InventoryError {
    map_pool_error(error, InventoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> InventoryError {
    map_diesel_error(error, InventoryError::query, InventoryError::connection)
}

/// Error type threaded through the transfer transaction so Diesel failures
/// trigger a rollback via `?`.
enum TxError {
    Inventory(InventoryError),
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl TxError {
    fn into_inventory_error(self) -> InventoryError {
        match self {
            Self::Inventory(err) => err,
            Self::Diesel(err) => map_diesel(err),
        }
    }
}

async fn zone_exists(
    conn: &mut AsyncPgConnection,
    zone_id: ZoneId,
) -> Result<bool, diesel::result::Error> {
    let found = parking_zones::table
        .filter(parking_zones::id.eq(zone_id.as_uuid()))
        .select(parking_zones::id)
        .first::<uuid::Uuid>(conn)
        .await
        .optional()?;
    Ok(found.is_some())
}

/// Decrement `available_spots` while it is positive. Zero rows updated means
/// either the zone is full or it does not exist; a follow-up lookup tells the
/// two apart.
async fn reserve_spot(conn: &mut AsyncPgConnection, zone_id: ZoneId) -> Result<(), TxError> {
    let updated = diesel::update(
        parking_zones::table.filter(
            parking_zones::id
                .eq(zone_id.as_uuid())
                .and(parking_zones::available_spots.gt(0)),
        ),
    )
    .set(parking_zones::available_spots.eq(parking_zones::available_spots - 1))
    .execute(conn)
    .await?;

    if updated == 1 {
        return Ok(());
    }
    if zone_exists(conn, zone_id).await? {
        Err(TxError::Inventory(InventoryError::ZoneFull { zone_id }))
    } else {
        Err(TxError::Inventory(InventoryError::ZoneNotFound { zone_id }))
    }
}

/// Increment `available_spots` while it is below `total_spots`. Zero rows on
/// an existing zone means a release without a matching reserve.
async fn release_spot(conn: &mut AsyncPgConnection, zone_id: ZoneId) -> Result<(), TxError> {
    let updated = diesel::update(
        parking_zones::table.filter(
            parking_zones::id
                .eq(zone_id.as_uuid())
                .and(parking_zones::available_spots.lt(parking_zones::total_spots)),
        ),
    )
    .set(parking_zones::available_spots.eq(parking_zones::available_spots + 1))
    .execute(conn)
    .await?;

    if updated == 1 {
        return Ok(());
    }
    if zone_exists(conn, zone_id).await? {
        Err(TxError::Inventory(InventoryError::CounterOverflow {
            zone_id,
        }))
    } else {
        Err(TxError::Inventory(InventoryError::ZoneNotFound { zone_id }))
    }
}

#[async_trait]
impl InventoryLedger for DieselInventoryLedger {
    async fn reserve(&self, zone_id: ZoneId) -> Result<(), InventoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        reserve_spot(&mut conn, zone_id)
            .await
            .map_err(TxError::into_inventory_error)
    }

    async fn release(&self, zone_id: ZoneId) -> Result<(), InventoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        release_spot(&mut conn, zone_id)
            .await
            .map_err(TxError::into_inventory_error)
    }

    async fn transfer(&self, from: ZoneId, to: ZoneId) -> Result<(), InventoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // Reserve the target first so a full target aborts before the source
        // spot is freed; rollback undoes the reservation if the release
        // fails.
        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                reserve_spot(conn, to).await?;
                release_spot(conn, from).await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(TxError::into_inventory_error)
    }
}

//! PostgreSQL-backed `CarRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CarRepository, CarRepositoryError};
use crate::domain::{Car, CarId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CarRow, NewCarRow};
use super::pool::{DbPool, PoolError};
use super::schema::cars;

/// Diesel-backed implementation of the car repository port.
#[derive(Clone)]
pub struct DieselCarRepository {
    pool: DbPool,
}

impl DieselCarRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> CarRepositoryError {
    map_pool_error(error, CarRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> CarRepositoryError {
    map_diesel_error(
        error,
        CarRepositoryError::query,
        CarRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain car.
fn row_to_car(row: CarRow) -> Result<Car, CarRepositoryError> {
    Car::new(
        CarId::from_uuid(row.id),
        UserId::from_uuid(row.owner_id),
        row.make,
        row.model,
        row.plate_number,
    )
    .map_err(|err| CarRepositoryError::query(err.to_string()))
}

#[async_trait]
impl CarRepository for DieselCarRepository {
    async fn insert(&self, car: &Car) -> Result<(), CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewCarRow {
            id: *car.id.as_uuid(),
            owner_id: *car.owner.as_uuid(),
            make: &car.make,
            model: &car.model,
            plate_number: &car.plate_number,
        };

        diesel::insert_into(cars::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_by_id(&self, car_id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = cars::table
            .filter(cars::id.eq(car_id.as_uuid()))
            .select(CarRow::as_select())
            .first::<CarRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_car).transpose()
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<CarRow> = cars::table
            .filter(cars::owner_id.eq(owner.as_uuid()))
            .order(cars::plate_number.asc())
            .select(CarRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_car).collect()
    }
}

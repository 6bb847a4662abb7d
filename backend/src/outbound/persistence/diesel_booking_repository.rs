//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingDraft, BookingId, CarId, UserId, ZoneId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BookingRow, BookingUpdate, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

/// Diesel-backed implementation of the booking repository port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> BookingRepositoryError {
    map_pool_error(error, BookingRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> BookingRepositoryError {
    map_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain booking.
///
/// The stored penalty is a pure function of the interval, so the constructor
/// recomputes an identical value; the column exists for reporting queries.
fn row_to_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    Booking::new(BookingDraft {
        id: BookingId::from_uuid(row.id),
        user: UserId::from_uuid(row.user_id),
        car: CarId::from_uuid(row.car_id),
        parking_zone: ZoneId::from_uuid(row.zone_id),
        start_time: row.start_time,
        end_time: row.end_time,
    })
    .map_err(|err| BookingRepositoryError::query(err.to_string()))
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewBookingRow {
            id: *booking.id().as_uuid(),
            user_id: *booking.user().as_uuid(),
            car_id: *booking.car().as_uuid(),
            zone_id: *booking.parking_zone().as_uuid(),
            start_time: booking.start_time(),
            end_time: booking.end_time(),
            penalty: booking.penalty(),
        };

        diesel::insert_into(bookings::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn update(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let changes = BookingUpdate {
            car_id: *booking.car().as_uuid(),
            zone_id: *booking.parking_zone().as_uuid(),
            start_time: booking.start_time(),
            end_time: booking.end_time(),
            penalty: booking.penalty(),
        };

        let updated =
            diesel::update(bookings::table.filter(bookings::id.eq(booking.id().as_uuid())))
                .set(&changes)
                .execute(&mut conn)
                .await
                .map_err(map_diesel)?;

        if updated == 0 {
            return Err(BookingRepositoryError::query("booking not found"));
        }
        Ok(())
    }

    async fn delete(&self, booking_id: BookingId) -> Result<(), BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::delete(bookings::table.filter(bookings::id.eq(booking_id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_by_id(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = bookings::table
            .filter(bookings::id.eq(booking_id.as_uuid()))
            .select(BookingRow::as_select())
            .first::<BookingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_booking).transpose()
    }

    async fn list_for_user(&self, user: UserId) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::user_id.eq(user.as_uuid()))
            .order(bookings::start_time.asc())
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_booking).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::SHORT_BOOKING_PENALTY;

    #[rstest]
    fn rows_rehydrate_with_a_recomputed_penalty() {
        let start = Utc::now();
        let booking = row_to_booking(BookingRow {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            car_id: uuid::Uuid::new_v4(),
            zone_id: uuid::Uuid::new_v4(),
            start_time: start,
            end_time: start + Duration::minutes(15),
            penalty: SHORT_BOOKING_PENALTY,
        })
        .expect("valid row");

        assert_eq!(booking.penalty(), SHORT_BOOKING_PENALTY);
    }

    #[rstest]
    fn rows_with_inverted_intervals_surface_as_query_errors() {
        let start = Utc::now();
        let result = row_to_booking(BookingRow {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            car_id: uuid::Uuid::new_v4(),
            zone_id: uuid::Uuid::new_v4(),
            start_time: start,
            end_time: start - Duration::minutes(1),
            penalty: 0.0,
        });

        assert!(matches!(result, Err(BookingRepositoryError::Query { .. })));
    }
}

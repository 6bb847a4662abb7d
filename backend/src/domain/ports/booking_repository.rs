//! Driven port for booking persistence.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Booking, BookingId, UserId};

/// Errors raised by booking repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingRepositoryError {
    /// Repository connection could not be established.
    #[error("booking repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("booking repository query failed: {message}")]
    Query { message: String },
}

impl BookingRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for writing and reading booking rows. The lifecycle service pairs
/// every mutation with the matching inventory ledger call; this port never
/// touches zone counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking.
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Overwrite an existing booking.
    async fn update(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Remove a booking row. Deleting an absent row is a no-op.
    async fn delete(&self, booking_id: BookingId) -> Result<(), BookingRepositoryError>;

    /// Find a booking by id.
    async fn find_by_id(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// List a user's bookings ordered by start time.
    async fn list_for_user(&self, user: UserId) -> Result<Vec<Booking>, BookingRepositoryError>;
}

/// Mutex-guarded booking store for tests and database-less deployments.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingRepository {
    bookings: Arc<Mutex<HashMap<Uuid, Booking>>>,
}

impl InMemoryBookingRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Booking>> {
        match self.bookings.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        self.lock().insert(*booking.id().as_uuid(), booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        self.lock().insert(*booking.id().as_uuid(), booking.clone());
        Ok(())
    }

    async fn delete(&self, booking_id: BookingId) -> Result<(), BookingRepositoryError> {
        self.lock().remove(booking_id.as_uuid());
        Ok(())
    }

    async fn find_by_id(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(self.lock().get(booking_id.as_uuid()).cloned())
    }

    async fn list_for_user(&self, user: UserId) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut bookings: Vec<Booking> = self
            .lock()
            .values()
            .filter(|booking| booking.user() == user)
            .cloned()
            .collect();
        bookings.sort_by_key(Booking::start_time);
        Ok(bookings)
    }
}

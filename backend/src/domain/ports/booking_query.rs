//! Driving port for booking reads.

use async_trait::async_trait;

use crate::domain::ports::BookingView;
use crate::domain::{BookingId, Error, UserId};

/// Domain use-case port for booking reads, scoped to the requesting user.
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Fetch a single booking owned by the user.
    async fn get_booking(&self, user: UserId, booking_id: BookingId)
        -> Result<BookingView, Error>;

    /// List the user's bookings ordered by start time.
    async fn list_bookings(&self, user: UserId) -> Result<Vec<BookingView>, Error>;
}

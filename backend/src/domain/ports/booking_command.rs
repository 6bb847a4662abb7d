//! Driving port for booking lifecycle mutations.
//!
//! Inbound adapters call this port to create, update, and delete bookings
//! without knowing how ledger pairing or penalty derivation is implemented.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::BookingView;
use crate::domain::{BookingId, CarId, Error, UserId, ZoneId};

/// Request to create a booking for the authenticated user.
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub user: UserId,
    pub car: CarId,
    pub parking_zone: ZoneId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Partial update of an existing booking; absent fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub car: Option<CarId>,
    pub parking_zone: Option<ZoneId>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl BookingChanges {
    /// True when neither timestamp is being changed.
    pub fn keeps_interval(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }
}

/// Request to update a booking owned by the authenticated user.
#[derive(Debug, Clone)]
pub struct UpdateBookingRequest {
    pub user: UserId,
    pub booking_id: BookingId,
    pub changes: BookingChanges,
}

/// Request to delete a booking owned by the authenticated user.
#[derive(Debug, Clone)]
pub struct DeleteBookingRequest {
    pub user: UserId,
    pub booking_id: BookingId,
}

/// Domain use-case port for booking mutations.
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Validate, reserve a spot, and persist a new booking.
    async fn create_booking(&self, request: CreateBookingRequest)
        -> Result<BookingView, Error>;

    /// Re-validate changed fields, transfer the reserved spot on zone change,
    /// and persist the updated booking.
    async fn update_booking(&self, request: UpdateBookingRequest)
        -> Result<BookingView, Error>;

    /// Release the reserved spot and remove the booking.
    async fn delete_booking(&self, request: DeleteBookingRequest) -> Result<(), Error>;
}

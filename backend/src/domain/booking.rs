//! Booking entity and the penalty rule.
//!
//! The penalty is a derived value, never client-settable: it is computed by
//! [`compute_penalty`] when a booking is committed and recomputed whenever the
//! start or end time changes.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CarId, UserId, ZoneId};

/// Stable booking identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Construct an id from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Bookings spanning this threshold or less incur the flat penalty.
pub const PENALTY_THRESHOLD_MINUTES: i64 = 30;

/// Flat fee for bookings at or below the threshold.
pub const SHORT_BOOKING_PENALTY: f64 = 50.0;

/// Flat fee charged when a booking's span is at or below the 30-minute
/// threshold; zero otherwise.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use kerbside::domain::compute_penalty;
///
/// let start = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
/// let short_end = Utc.with_ymd_and_hms(2025, 1, 1, 10, 29, 0).unwrap();
/// let long_end = Utc.with_ymd_and_hms(2025, 1, 1, 10, 31, 0).unwrap();
/// assert_eq!(compute_penalty(start, short_end), 50.0);
/// assert_eq!(compute_penalty(start, long_end), 0.0);
/// ```
pub fn compute_penalty(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> f64 {
    if start_time < end_time - Duration::minutes(PENALTY_THRESHOLD_MINUTES) {
        0.0
    } else {
        SHORT_BOOKING_PENALTY
    }
}

/// Validation errors returned by [`Booking::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    #[error("start_time must be before end_time")]
    StartNotBeforeEnd,
}

/// Input payload for [`Booking::new`].
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub id: BookingId,
    pub user: UserId,
    pub car: CarId,
    pub parking_zone: ZoneId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// A reservation binding one user, one car, and one zone to a time interval.
///
/// Invariants: `start_time < end_time`; the penalty is always the value of
/// [`compute_penalty`] for the current interval. The `car.owner == user` rule
/// is enforced by the lifecycle service, which has both records in hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: BookingId,
    user: UserId,
    car: CarId,
    parking_zone: ZoneId,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    penalty: f64,
}

impl Booking {
    /// Validate the interval and construct a booking with its derived penalty.
    pub fn new(draft: BookingDraft) -> Result<Self, BookingValidationError> {
        if draft.start_time >= draft.end_time {
            return Err(BookingValidationError::StartNotBeforeEnd);
        }
        let penalty = compute_penalty(draft.start_time, draft.end_time);
        Ok(Self {
            id: draft.id,
            user: draft.user,
            car: draft.car,
            parking_zone: draft.parking_zone,
            start_time: draft.start_time,
            end_time: draft.end_time,
            penalty,
        })
    }

    /// Returns the booking id.
    pub fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the owning user id.
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Returns the booked car id.
    pub fn car(&self) -> CarId {
        self.car
    }

    /// Returns the booked zone id.
    pub fn parking_zone(&self) -> ZoneId {
        self.parking_zone
    }

    /// Returns the start of the reserved interval.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Returns the end of the reserved interval.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Returns the penalty frozen at the last commit.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Rebind the booking to another car. Ownership is re-validated by the
    /// lifecycle service before this is called.
    pub fn with_car(mut self, car: CarId) -> Self {
        self.car = car;
        self
    }

    /// Rebind the booking to another zone. The matching ledger transfer is the
    /// caller's responsibility.
    pub fn with_zone(mut self, zone: ZoneId) -> Self {
        self.parking_zone = zone;
        self
    }

    /// Replace the reserved interval, recomputing the penalty.
    pub fn with_interval(
        mut self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self, BookingValidationError> {
        if start_time >= end_time {
            return Err(BookingValidationError::StartNotBeforeEnd);
        }
        self.start_time = start_time;
        self.end_time = end_time;
        self.penalty = compute_penalty(start_time, end_time);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, h, m, 0).single().expect("valid timestamp")
    }

    fn draft(start: DateTime<Utc>, end: DateTime<Utc>) -> BookingDraft {
        BookingDraft {
            id: BookingId::random(),
            user: UserId::random(),
            car: CarId::random(),
            parking_zone: ZoneId::random(),
            start_time: start,
            end_time: end,
        }
    }

    #[rstest]
    #[case(ts(10, 0), ts(10, 29), SHORT_BOOKING_PENALTY)]
    #[case(ts(10, 0), ts(10, 30), SHORT_BOOKING_PENALTY)]
    #[case(ts(10, 0), ts(10, 31), 0.0)]
    #[case(ts(10, 0), ts(12, 0), 0.0)]
    fn penalty_follows_threshold(
        #[case] start: DateTime<Utc>,
        #[case] end: DateTime<Utc>,
        #[case] expected: f64,
    ) {
        assert_eq!(compute_penalty(start, end), expected);
    }

    #[rstest]
    fn new_booking_freezes_penalty() {
        let booking = Booking::new(draft(ts(10, 0), ts(10, 20))).expect("valid booking");
        assert_eq!(booking.penalty(), SHORT_BOOKING_PENALTY);
    }

    #[rstest]
    #[case(ts(10, 0), ts(10, 0))]
    #[case(ts(10, 30), ts(10, 0))]
    fn rejects_degenerate_intervals(#[case] start: DateTime<Utc>, #[case] end: DateTime<Utc>) {
        assert_eq!(
            Booking::new(draft(start, end)).expect_err("invalid interval"),
            BookingValidationError::StartNotBeforeEnd,
        );
    }

    #[rstest]
    fn interval_change_recomputes_penalty() {
        let booking = Booking::new(draft(ts(10, 0), ts(10, 20))).expect("valid booking");
        assert_eq!(booking.penalty(), SHORT_BOOKING_PENALTY);

        let widened = booking
            .with_interval(ts(10, 0), ts(11, 0))
            .expect("valid interval");
        assert_eq!(widened.penalty(), 0.0);
    }

    #[rstest]
    fn interval_change_rejects_reversed_times() {
        let booking = Booking::new(draft(ts(10, 0), ts(11, 0))).expect("valid booking");
        assert!(booking.with_interval(ts(12, 0), ts(11, 0)).is_err());
    }
}

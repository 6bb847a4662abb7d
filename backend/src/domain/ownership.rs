//! Ownership and capacity pre-checks.
//!
//! These are pure, non-authoritative checks the lifecycle service runs before
//! committing to ledger calls, so obviously doomed requests short-circuit
//! without a wasted transaction. Under concurrency they are TOCTOU-prone, so
//! the inventory ledger always re-checks atomically.

use crate::domain::{Car, ParkingZone, UserId};

/// True when the car is owned by the given user.
pub fn car_belongs_to(user: UserId, car: &Car) -> bool {
    car.owner == user
}

/// True when the zone currently reports at least one free spot.
pub fn zone_has_capacity(zone: &ParkingZone) -> bool {
    zone.has_capacity()
}

//! Read-side view projections returned by the driving ports.
//!
//! One canonical entity, separate view projections: the booking view nests
//! car and zone snapshots so clients never assemble them from extra lookups,
//! while write requests reference cars and zones by id only.

use chrono::{DateTime, Utc};

use crate::domain::{Booking, BookingId, Car, CarId, ParkingZone, UserId, ZoneId};

/// Car snapshot exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarView {
    pub id: CarId,
    pub owner: UserId,
    pub make: String,
    pub model: String,
    pub plate_number: String,
}

impl From<Car> for CarView {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            owner: car.owner,
            make: car.make,
            model: car.model,
            plate_number: car.plate_number,
        }
    }
}

/// Zone snapshot exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneView {
    pub id: ZoneId,
    pub name: String,
    pub location: String,
    pub total_spots: i32,
    pub available_spots: i32,
}

impl From<ParkingZone> for ZoneView {
    fn from(zone: ParkingZone) -> Self {
        Self {
            id: zone.id(),
            name: zone.name().to_owned(),
            location: zone.location().to_owned(),
            total_spots: zone.total_spots(),
            available_spots: zone.available_spots(),
        }
    }
}

/// Booking snapshot with nested car and zone views.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingView {
    pub id: BookingId,
    pub user: UserId,
    pub car: CarView,
    pub parking_zone: ZoneView,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub penalty: f64,
}

impl BookingView {
    /// Compose a view from the booking and its related records.
    pub fn compose(booking: &Booking, car: Car, zone: ParkingZone) -> Self {
        Self {
            id: booking.id(),
            user: booking.user(),
            car: CarView::from(car),
            parking_zone: ZoneView::from(zone),
            start_time: booking.start_time(),
            end_time: booking.end_time(),
            penalty: booking.penalty(),
        }
    }
}

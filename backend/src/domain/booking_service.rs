//! Booking lifecycle services.
//!
//! These services implement the [`BookingCommand`] and [`BookingQuery`]
//! driving ports. Every booking mutation is paired with the matching
//! inventory ledger call, and a failed persist triggers the compensating
//! ledger action so no partial state survives an error.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, warn};

use async_trait::async_trait;

use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError, BookingView,
    CarRepository, CarRepositoryError, CreateBookingRequest, DeleteBookingRequest, InventoryError,
    InventoryLedger, UpdateBookingRequest, ZoneRepository, ZoneRepositoryError,
};
use crate::domain::{
    car_belongs_to, zone_has_capacity, Booking, BookingDraft, BookingId, Car, CarId, Error,
    ParkingZone, UserId, ZoneId,
};

fn map_booking_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
    }
}

fn map_car_repository_error(error: CarRepositoryError) -> Error {
    match error {
        CarRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("car repository unavailable: {message}"))
        }
        CarRepositoryError::Query { message } => {
            Error::internal(format!("car repository error: {message}"))
        }
    }
}

fn map_zone_repository_error(error: ZoneRepositoryError) -> Error {
    match error {
        ZoneRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("zone repository unavailable: {message}"))
        }
        ZoneRepositoryError::Query { message } => {
            Error::internal(format!("zone repository error: {message}"))
        }
    }
}

fn zone_full_error(zone_id: ZoneId) -> Error {
    Error::invalid_request(format!("parking zone {zone_id} has no available spots"))
        .with_details(json!({ "code": "zone_full", "parkingZone": zone_id }))
}

fn map_inventory_error(error: InventoryError) -> Error {
    match error {
        InventoryError::ZoneFull { zone_id } => zone_full_error(zone_id),
        InventoryError::ZoneNotFound { zone_id } => {
            Error::invalid_request(format!("unknown parking zone {zone_id}"))
                .with_details(json!({ "field": "parking_zone" }))
        }
        InventoryError::CounterOverflow { .. } | InventoryError::Query { .. } => {
            Error::internal(format!("inventory ledger error: {error}"))
        }
        InventoryError::Connection { message } => {
            Error::service_unavailable(format!("inventory ledger unavailable: {message}"))
        }
    }
}

fn booking_not_found(booking_id: BookingId) -> Error {
    Error::not_found(format!("booking {booking_id} not found"))
}

/// Fetch the car and zone a booking references and assemble the view. Both
/// rows existed when the booking was committed, so a miss here is a data
/// integrity fault, not a client error.
async fn compose_view(
    cars: &dyn CarRepository,
    zones: &dyn ZoneRepository,
    booking: &Booking,
) -> Result<BookingView, Error> {
    let car = cars
        .find_by_id(booking.car())
        .await
        .map_err(map_car_repository_error)?
        .ok_or_else(|| Error::internal(format!("booking {} references a missing car", booking.id())))?;
    let zone = zones
        .find_by_id(booking.parking_zone())
        .await
        .map_err(map_zone_repository_error)?
        .ok_or_else(|| {
            Error::internal(format!("booking {} references a missing zone", booking.id()))
        })?;
    Ok(BookingView::compose(booking, car, zone))
}

/// Load a car and enforce that the requesting user owns it.
async fn load_owned_car(
    cars: &dyn CarRepository,
    user: UserId,
    car_id: CarId,
) -> Result<Car, Error> {
    let car = cars
        .find_by_id(car_id)
        .await
        .map_err(map_car_repository_error)?
        .ok_or_else(|| {
            Error::invalid_request(format!("unknown car {car_id}"))
                .with_details(json!({ "field": "car" }))
        })?;
    if !car_belongs_to(user, &car) {
        return Err(Error::forbidden("car does not belong to the authenticated user"));
    }
    Ok(car)
}

async fn load_zone(zones: &dyn ZoneRepository, zone_id: ZoneId) -> Result<ParkingZone, Error> {
    zones
        .find_by_id(zone_id)
        .await
        .map_err(map_zone_repository_error)?
        .ok_or_else(|| {
            Error::invalid_request(format!("unknown parking zone {zone_id}"))
                .with_details(json!({ "field": "parking_zone" }))
        })
}

/// Booking service implementing the command driving port.
#[derive(Clone)]
pub struct BookingCommandService<B, C, Z, L> {
    bookings: Arc<B>,
    cars: Arc<C>,
    zones: Arc<Z>,
    ledger: Arc<L>,
}

impl<B, C, Z, L> BookingCommandService<B, C, Z, L> {
    /// Create a command service over the given repositories and ledger.
    pub fn new(bookings: Arc<B>, cars: Arc<C>, zones: Arc<Z>, ledger: Arc<L>) -> Self {
        Self {
            bookings,
            cars,
            zones,
            ledger,
        }
    }
}

#[async_trait]
impl<B, C, Z, L> BookingCommand for BookingCommandService<B, C, Z, L>
where
    B: BookingRepository,
    C: CarRepository,
    Z: ZoneRepository,
    L: InventoryLedger,
{
    async fn create_booking(&self, request: CreateBookingRequest) -> Result<BookingView, Error> {
        let car = load_owned_car(self.cars.as_ref(), request.user, request.car).await?;
        let zone = load_zone(self.zones.as_ref(), request.parking_zone).await?;

        // Cheap pre-check; the ledger re-checks atomically under its own lock.
        if !zone_has_capacity(&zone) {
            return Err(zone_full_error(zone.id()));
        }

        let booking = Booking::new(BookingDraft {
            id: BookingId::random(),
            user: request.user,
            car: car.id,
            parking_zone: zone.id(),
            start_time: request.start_time,
            end_time: request.end_time,
        })
        .map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "start_time" }))
        })?;

        self.ledger
            .reserve(zone.id())
            .await
            .map_err(map_inventory_error)?;

        if let Err(err) = self.bookings.insert(&booking).await {
            if let Err(release_err) = self.ledger.release(zone.id()).await {
                error!(
                    zone_id = %zone.id(),
                    error = %release_err,
                    "compensating release failed after booking insert error",
                );
            }
            return Err(map_booking_repository_error(err));
        }

        compose_view(self.cars.as_ref(), self.zones.as_ref(), &booking).await
    }

    async fn update_booking(&self, request: UpdateBookingRequest) -> Result<BookingView, Error> {
        let existing = self
            .bookings
            .find_by_id(request.booking_id)
            .await
            .map_err(map_booking_repository_error)?
            .ok_or_else(|| booking_not_found(request.booking_id))?;
        // Foreign bookings are indistinguishable from absent ones.
        if existing.user() != request.user {
            return Err(booking_not_found(request.booking_id));
        }

        let changes = request.changes;
        let mut updated = existing.clone();

        if let Some(car_id) = changes.car {
            let car = load_owned_car(self.cars.as_ref(), request.user, car_id).await?;
            updated = updated.with_car(car.id);
        }

        if !changes.keeps_interval() {
            let start = changes.start_time.unwrap_or_else(|| existing.start_time());
            let end = changes.end_time.unwrap_or_else(|| existing.end_time());
            updated = updated.with_interval(start, end).map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "start_time" }))
            })?;
        }

        let new_zone = changes
            .parking_zone
            .filter(|zone_id| *zone_id != existing.parking_zone());
        match new_zone {
            Some(zone_id) => {
                load_zone(self.zones.as_ref(), zone_id).await?;
                updated = updated.with_zone(zone_id);

                self.ledger
                    .transfer(existing.parking_zone(), zone_id)
                    .await
                    .map_err(map_inventory_error)?;

                if let Err(err) = self.bookings.update(&updated).await {
                    if let Err(undo_err) = self
                        .ledger
                        .transfer(zone_id, existing.parking_zone())
                        .await
                    {
                        error!(
                            from_zone = %zone_id,
                            to_zone = %existing.parking_zone(),
                            error = %undo_err,
                            "reverse transfer failed after booking update error",
                        );
                    }
                    return Err(map_booking_repository_error(err));
                }
            }
            None => {
                self.bookings
                    .update(&updated)
                    .await
                    .map_err(map_booking_repository_error)?;
            }
        }

        compose_view(self.cars.as_ref(), self.zones.as_ref(), &updated).await
    }

    async fn delete_booking(&self, request: DeleteBookingRequest) -> Result<(), Error> {
        let existing = self
            .bookings
            .find_by_id(request.booking_id)
            .await
            .map_err(map_booking_repository_error)?
            .ok_or_else(|| booking_not_found(request.booking_id))?;
        if existing.user() != request.user {
            return Err(booking_not_found(request.booking_id));
        }

        match self.ledger.release(existing.parking_zone()).await {
            Ok(()) => {}
            // A vanished zone must not strand the booking row.
            Err(InventoryError::ZoneNotFound { zone_id }) => {
                warn!(%zone_id, booking_id = %request.booking_id, "zone missing during booking delete; skipping release");
            }
            Err(err) => return Err(map_inventory_error(err)),
        }

        self.bookings
            .delete(request.booking_id)
            .await
            .map_err(map_booking_repository_error)
    }
}

/// Booking service implementing the query driving port.
#[derive(Clone)]
pub struct BookingQueryService<B, C, Z> {
    bookings: Arc<B>,
    cars: Arc<C>,
    zones: Arc<Z>,
}

impl<B, C, Z> BookingQueryService<B, C, Z> {
    /// Create a query service over the given repositories.
    pub fn new(bookings: Arc<B>, cars: Arc<C>, zones: Arc<Z>) -> Self {
        Self {
            bookings,
            cars,
            zones,
        }
    }
}

#[async_trait]
impl<B, C, Z> BookingQuery for BookingQueryService<B, C, Z>
where
    B: BookingRepository,
    C: CarRepository,
    Z: ZoneRepository,
{
    async fn get_booking(
        &self,
        user: UserId,
        booking_id: BookingId,
    ) -> Result<BookingView, Error> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await
            .map_err(map_booking_repository_error)?
            .ok_or_else(|| booking_not_found(booking_id))?;
        if booking.user() != user {
            return Err(booking_not_found(booking_id));
        }
        compose_view(self.cars.as_ref(), self.zones.as_ref(), &booking).await
    }

    async fn list_bookings(&self, user: UserId) -> Result<Vec<BookingView>, Error> {
        let bookings = self
            .bookings
            .list_for_user(user)
            .await
            .map_err(map_booking_repository_error)?;
        let mut views = Vec::with_capacity(bookings.len());
        for booking in &bookings {
            views.push(compose_view(self.cars.as_ref(), self.zones.as_ref(), booking).await?);
        }
        Ok(views)
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;

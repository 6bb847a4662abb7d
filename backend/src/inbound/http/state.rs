//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BookingCommand, BookingQuery, CarService, IdentityService, InMemoryBookingRepository,
    InMemoryCarRepository, InMemoryUserRepository, InMemoryZoneStore, NotificationGateway,
    ZoneService,
};
use crate::domain::{
    BookingCommandService, BookingQueryService, CarServiceImpl, IdentityServiceImpl,
    ZoneServiceImpl,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityService>,
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
    pub cars: Arc<dyn CarService>,
    pub zones: Arc<dyn ZoneService>,
}

impl HttpState {
    /// Wire the full service stack over in-memory adapters. Used by tests and
    /// by deployments running without a database.
    pub fn in_memory(notifier: Arc<dyn NotificationGateway>) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let bookings = Arc::new(InMemoryBookingRepository::new());
        let cars = Arc::new(InMemoryCarRepository::new());
        // One store implements both the zone repository and the ledger so the
        // counters handlers read are the counters the ledger mutates.
        let zone_store = Arc::new(InMemoryZoneStore::new());

        Self {
            identity: Arc::new(IdentityServiceImpl::new(users, notifier)),
            bookings: Arc::new(BookingCommandService::new(
                Arc::clone(&bookings),
                Arc::clone(&cars),
                Arc::clone(&zone_store),
                Arc::clone(&zone_store),
            )),
            bookings_query: Arc::new(BookingQueryService::new(
                bookings,
                Arc::clone(&cars),
                Arc::clone(&zone_store),
            )),
            cars: Arc::new(CarServiceImpl::new(cars)),
            zones: Arc::new(ZoneServiceImpl::new(zone_store)),
        }
    }
}

//! Ports for the hexagonal domain layer.
//!
//! Driven ports (`*Repository`, [`InventoryLedger`], [`NotificationGateway`])
//! are implemented by outbound adapters; driving ports ([`BookingCommand`],
//! [`BookingQuery`], [`CarService`], [`ZoneService`], [`IdentityService`]) are
//! implemented by domain services and consumed by the HTTP layer.

pub mod booking_command;
pub mod booking_query;
pub mod booking_repository;
pub mod car_repository;
pub mod car_service;
pub mod identity_service;
pub mod inventory_ledger;
pub mod notification_gateway;
pub mod user_repository;
pub mod views;
pub mod zone_repository;
pub mod zone_service;

pub use booking_command::{
    BookingChanges, BookingCommand, CreateBookingRequest, DeleteBookingRequest,
    UpdateBookingRequest,
};
pub use booking_query::BookingQuery;
pub use booking_repository::{BookingRepository, BookingRepositoryError, InMemoryBookingRepository};
pub use car_repository::{CarRepository, CarRepositoryError, InMemoryCarRepository};
pub use car_service::{CarService, RegisterCarRequest};
pub use identity_service::{Credentials, IdentityService, RegisterUserRequest};
pub use inventory_ledger::{InventoryError, InventoryLedger};
pub use notification_gateway::{
    NoOpNotificationGateway, NotificationError, NotificationGateway, RecordingNotificationGateway,
};
pub use user_repository::{InMemoryUserRepository, UserRepository, UserRepositoryError};
pub use views::{BookingView, CarView, ZoneView};
pub use zone_repository::{InMemoryZoneStore, ZoneRepository, ZoneRepositoryError};
pub use zone_service::{CreateZoneRequest, ZoneService};

#[cfg(test)]
pub use booking_repository::MockBookingRepository;
#[cfg(test)]
pub use car_repository::MockCarRepository;
#[cfg(test)]
pub use inventory_ledger::MockInventoryLedger;
#[cfg(test)]
pub use zone_repository::MockZoneRepository;

//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's driven ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No business logic lives here.
//! - **Internal models**: the row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leak to the domain layer.
//! - **Guarded counters**: the inventory ledger mutates `available_spots`
//!   with single guarded `UPDATE` statements, so concurrent reservations
//!   serialise on the zone row.
//! - **Strongly typed errors**: every database failure is mapped to the
//!   owning port's error type.

mod diesel_booking_repository;
mod diesel_car_repository;
mod diesel_error_mapping;
mod diesel_inventory_ledger;
mod diesel_user_repository;
mod diesel_zone_repository;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_car_repository::DieselCarRepository;
pub use diesel_inventory_ledger::DieselInventoryLedger;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_zone_repository::DieselZoneRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

//! Domain layer: entities, invariants, and the ports that surround them.
//!
//! Everything here is infrastructure-free. Adapters live under
//! `crate::inbound` and `crate::outbound` and talk to this layer only
//! through the traits in [`ports`].

pub mod booking;
pub mod booking_service;
pub mod car;
pub mod car_service;
pub mod credentials;
pub mod error;
pub mod identity_service;
pub mod ownership;
pub mod ports;
pub mod user;
pub mod zone;
pub mod zone_service;

pub use booking::{
    compute_penalty, Booking, BookingDraft, BookingId, BookingValidationError,
    PENALTY_THRESHOLD_MINUTES, SHORT_BOOKING_PENALTY,
};
pub use booking_service::{BookingCommandService, BookingQueryService};
pub use car::{Car, CarId, CarValidationError};
pub use car_service::CarServiceImpl;
pub use credentials::{hash_password, verify_password};
pub use error::{Error, ErrorCode};
pub use identity_service::IdentityServiceImpl;
pub use ownership::{car_belongs_to, zone_has_capacity};
pub use user::{User, UserId, UserValidationError};
pub use zone::{ParkingZone, ZoneId, ZoneValidationError};
pub use zone_service::ZoneServiceImpl;

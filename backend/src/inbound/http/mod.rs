//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod bookings;
pub mod cars;
pub mod error;
pub mod health;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod zones;

pub use error::ApiResult;

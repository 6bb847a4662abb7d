//! Driven port for the inventory ledger: the sole arbiter of a zone's
//! `available_spots` counter.
//!
//! Every operation is a single atomic read-modify-write on the zone row.
//! Two concurrent `reserve` calls against a zone with one free spot must
//! yield exactly one success and one [`InventoryError::ZoneFull`].

use async_trait::async_trait;

use crate::domain::ZoneId;

/// Errors raised by inventory ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// No free spots remain in the zone; the caller may retry with another
    /// zone or time.
    #[error("parking zone {zone_id} has no available spots")]
    ZoneFull { zone_id: ZoneId },

    /// The zone row does not exist.
    #[error("parking zone {zone_id} not found")]
    ZoneNotFound { zone_id: ZoneId },

    /// A release would push the counter past `total_spots`. The counter is
    /// left clamped; the error reports the bookkeeping bug instead of
    /// absorbing it.
    #[error("parking zone {zone_id} counter already at capacity; release has no matching reserve")]
    CounterOverflow { zone_id: ZoneId },

    /// Ledger storage could not be reached.
    #[error("inventory ledger connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("inventory ledger query failed: {message}")]
    Query { message: String },
}

impl InventoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for atomic spot reservation and release.
///
/// `transfer` reserves the target zone *before* releasing the source so a
/// failed reservation never leaves the source already freed. This ordering is
/// the core correctness rule of the whole system.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryLedger: Send + Sync {
    /// Atomically decrement `available_spots` when it is positive; fail with
    /// [`InventoryError::ZoneFull`] otherwise, leaving state unchanged.
    async fn reserve(&self, zone_id: ZoneId) -> Result<(), InventoryError>;

    /// Atomically increment `available_spots`, clamped at `total_spots`.
    async fn release(&self, zone_id: ZoneId) -> Result<(), InventoryError>;

    /// Move one reserved spot between zones: reserve `to`, then release
    /// `from`, atomically. On failure neither counter changes.
    async fn transfer(&self, from: ZoneId, to: ZoneId) -> Result<(), InventoryError>;
}

//! Parking zone entity and its capacity invariant.
//!
//! `available_spots` is only ever mutated through the inventory ledger port;
//! this type enforces `0 <= available_spots <= total_spots` at construction so
//! adapters cannot smuggle an inconsistent counter back into the domain.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable zone identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(Uuid);

impl ZoneId {
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

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors returned by [`ParkingZone::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("total_spots must not be negative")]
    NegativeTotalSpots,
    #[error("available_spots must be between 0 and total_spots")]
    AvailableSpotsOutOfRange,
}

/// A named parking area with a fixed total capacity and a live counter of
/// free spots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingZone {
    id: ZoneId,
    name: String,
    location: String,
    total_spots: i32,
    available_spots: i32,
}

impl ParkingZone {
    /// Validate the capacity invariant and construct a zone.
    pub fn new(
        id: ZoneId,
        name: impl Into<String>,
        location: impl Into<String>,
        total_spots: i32,
        available_spots: i32,
    ) -> Result<Self, ZoneValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ZoneValidationError::EmptyName);
        }
        if total_spots < 0 {
            return Err(ZoneValidationError::NegativeTotalSpots);
        }
        if available_spots < 0 || available_spots > total_spots {
            return Err(ZoneValidationError::AvailableSpotsOutOfRange);
        }
        Ok(Self {
            id,
            name,
            location: location.into(),
            total_spots,
            available_spots,
        })
    }

    /// Returns the zone id.
    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// Returns the zone name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the human-readable location.
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Returns the fixed total capacity.
    pub fn total_spots(&self) -> i32 {
        self.total_spots
    }

    /// Returns the live free-spot counter.
    pub fn available_spots(&self) -> i32 {
        self.available_spots
    }

    /// True when at least one spot is free. Non-authoritative under
    /// concurrency; the inventory ledger re-checks atomically.
    pub fn has_capacity(&self) -> bool {
        self.available_spots > 0
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn build(total: i32, available: i32) -> Result<ParkingZone, ZoneValidationError> {
        ParkingZone::new(ZoneId::random(), "Central", "1 High St", total, available)
    }

    #[rstest]
    fn accepts_full_and_empty_counters() {
        assert!(build(10, 10).is_ok());
        assert!(build(10, 0).is_ok());
    }

    #[rstest]
    #[case(-1, 0, ZoneValidationError::NegativeTotalSpots)]
    #[case(5, -1, ZoneValidationError::AvailableSpotsOutOfRange)]
    #[case(5, 6, ZoneValidationError::AvailableSpotsOutOfRange)]
    fn rejects_invariant_violations(
        #[case] total: i32,
        #[case] available: i32,
        #[case] expected: ZoneValidationError,
    ) {
        assert_eq!(build(total, available).expect_err("invalid"), expected);
    }

    #[rstest]
    fn capacity_check_matches_counter() {
        assert!(build(3, 1).expect("zone").has_capacity());
        assert!(!build(3, 0).expect("zone").has_capacity());
    }
}

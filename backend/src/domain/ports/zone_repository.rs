//! Driven port for parking zone persistence, plus the in-memory store that
//! backs tests and database-less deployments.
//!
//! The in-memory store implements both this repository port and the
//! [`InventoryLedger`] port over one mutex-guarded map, so counter mutations
//! are serialised exactly as the concurrency model requires.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{InventoryError, InventoryLedger};
use crate::domain::{ParkingZone, ZoneId};

/// Errors raised by zone repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneRepositoryError {
    /// Repository connection could not be established.
    #[error("zone repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("zone repository query failed: {message}")]
    Query { message: String },
}

impl ZoneRepositoryError {
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

/// Port for creating and reading parking zones. Counter mutation is *not*
/// part of this port; all writers of `available_spots` go through the
/// inventory ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Persist a new zone.
    async fn insert(&self, zone: &ParkingZone) -> Result<(), ZoneRepositoryError>;

    /// Find a zone by id.
    async fn find_by_id(&self, zone_id: ZoneId)
        -> Result<Option<ParkingZone>, ZoneRepositoryError>;

    /// List all zones ordered by name.
    async fn list(&self) -> Result<Vec<ParkingZone>, ZoneRepositoryError>;
}

/// Mutex-guarded zone store implementing both the repository and the ledger.
#[derive(Debug, Default, Clone)]
pub struct InMemoryZoneStore {
    zones: Arc<Mutex<HashMap<Uuid, ParkingZone>>>,
}

impl InMemoryZoneStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, ParkingZone>> {
        // Poisoning only occurs if a holder panicked; the map itself is still
        // structurally sound, so recover the guard.
        match self.zones.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn mutate_counter(
        zones: &mut HashMap<Uuid, ParkingZone>,
        zone_id: ZoneId,
        delta: i32,
    ) -> Result<(), InventoryError> {
        let zone = zones
            .get(zone_id.as_uuid())
            .ok_or(InventoryError::ZoneNotFound { zone_id })?;

        let next = zone.available_spots() + delta;
        if next < 0 {
            return Err(InventoryError::ZoneFull { zone_id });
        }
        if next > zone.total_spots() {
            return Err(InventoryError::CounterOverflow { zone_id });
        }

        let updated = ParkingZone::new(
            zone.id(),
            zone.name(),
            zone.location(),
            zone.total_spots(),
            next,
        )
        .map_err(|err| InventoryError::query(err.to_string()))?;
        zones.insert(*zone_id.as_uuid(), updated);
        Ok(())
    }
}

#[async_trait]
impl ZoneRepository for InMemoryZoneStore {
    async fn insert(&self, zone: &ParkingZone) -> Result<(), ZoneRepositoryError> {
        self.lock().insert(*zone.id().as_uuid(), zone.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        zone_id: ZoneId,
    ) -> Result<Option<ParkingZone>, ZoneRepositoryError> {
        Ok(self.lock().get(zone_id.as_uuid()).cloned())
    }

    async fn list(&self) -> Result<Vec<ParkingZone>, ZoneRepositoryError> {
        let mut zones: Vec<ParkingZone> = self.lock().values().cloned().collect();
        zones.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(zones)
    }
}

#[async_trait]
impl InventoryLedger for InMemoryZoneStore {
    async fn reserve(&self, zone_id: ZoneId) -> Result<(), InventoryError> {
        Self::mutate_counter(&mut self.lock(), zone_id, -1)
    }

    async fn release(&self, zone_id: ZoneId) -> Result<(), InventoryError> {
        Self::mutate_counter(&mut self.lock(), zone_id, 1)
    }

    async fn transfer(&self, from: ZoneId, to: ZoneId) -> Result<(), InventoryError> {
        let mut zones = self.lock();
        Self::mutate_counter(&mut zones, to, -1)?;
        if let Err(err) = Self::mutate_counter(&mut zones, from, 1) {
            // Undo the reservation so a failed release leaves no partial state.
            let _ = Self::mutate_counter(&mut zones, to, 1);
            return Err(err);
        }
        Ok(())
    }
}

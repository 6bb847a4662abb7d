//! Driving port for parking zone creation and reads.

use async_trait::async_trait;

use crate::domain::ports::ZoneView;
use crate::domain::{Error, ZoneId};

/// Request to create a parking zone. New zones start with every spot free.
#[derive(Debug, Clone)]
pub struct CreateZoneRequest {
    pub name: String,
    pub location: String,
    pub total_spots: i32,
}

/// Domain use-case port for zones.
#[async_trait]
pub trait ZoneService: Send + Sync {
    /// Validate and persist a zone.
    async fn create_zone(&self, request: CreateZoneRequest) -> Result<ZoneView, Error>;

    /// Fetch a zone by id.
    async fn get_zone(&self, zone_id: ZoneId) -> Result<ZoneView, Error>;

    /// List all zones.
    async fn list_zones(&self) -> Result<Vec<ZoneView>, Error>;
}

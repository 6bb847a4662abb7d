//! Parking zone domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    CreateZoneRequest, ZoneRepository, ZoneRepositoryError, ZoneService, ZoneView,
};
use crate::domain::{Error, ParkingZone, ZoneId, ZoneValidationError};

fn map_repository_error(error: ZoneRepositoryError) -> Error {
    match error {
        ZoneRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("zone repository unavailable: {message}"))
        }
        ZoneRepositoryError::Query { message } => {
            Error::internal(format!("zone repository error: {message}"))
        }
    }
}

fn map_validation_error(error: ZoneValidationError) -> Error {
    let field = match error {
        ZoneValidationError::EmptyName => "name",
        ZoneValidationError::NegativeTotalSpots
        | ZoneValidationError::AvailableSpotsOutOfRange => "total_spots",
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

/// Zone service implementing the [`ZoneService`] driving port. Zone reads are
/// public; only creation requires a session, enforced by the inbound adapter.
#[derive(Clone)]
pub struct ZoneServiceImpl<R> {
    zones: Arc<R>,
}

impl<R> ZoneServiceImpl<R> {
    /// Create a zone service over the given repository.
    pub fn new(zones: Arc<R>) -> Self {
        Self { zones }
    }
}

#[async_trait]
impl<R> ZoneService for ZoneServiceImpl<R>
where
    R: ZoneRepository,
{
    async fn create_zone(&self, request: CreateZoneRequest) -> Result<ZoneView, Error> {
        // New zones start with every spot free.
        let zone = ParkingZone::new(
            ZoneId::random(),
            request.name,
            request.location,
            request.total_spots,
            request.total_spots,
        )
        .map_err(map_validation_error)?;

        self.zones
            .insert(&zone)
            .await
            .map_err(map_repository_error)?;
        Ok(ZoneView::from(zone))
    }

    async fn get_zone(&self, zone_id: ZoneId) -> Result<ZoneView, Error> {
        let zone = self
            .zones
            .find_by_id(zone_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("parking zone {zone_id} not found")))?;
        Ok(ZoneView::from(zone))
    }

    async fn list_zones(&self) -> Result<Vec<ZoneView>, Error> {
        let zones = self.zones.list().await.map_err(map_repository_error)?;
        Ok(zones.into_iter().map(ZoneView::from).collect())
    }
}

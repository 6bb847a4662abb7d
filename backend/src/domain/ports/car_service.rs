//! Driving port for car registration and reads.

use async_trait::async_trait;

use crate::domain::ports::CarView;
use crate::domain::{CarId, Error, UserId};

/// Request to register a car for the authenticated user.
#[derive(Debug, Clone)]
pub struct RegisterCarRequest {
    pub owner: UserId,
    pub make: String,
    pub model: String,
    pub plate_number: String,
}

/// Domain use-case port for cars.
#[async_trait]
pub trait CarService: Send + Sync {
    /// Validate and persist a car owned by the requesting user.
    async fn register_car(&self, request: RegisterCarRequest) -> Result<CarView, Error>;

    /// Fetch one of the user's cars.
    async fn get_car(&self, owner: UserId, car_id: CarId) -> Result<CarView, Error>;

    /// List the user's cars.
    async fn list_cars(&self, owner: UserId) -> Result<Vec<CarView>, Error>;
}

//! Car domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    CarRepository, CarRepositoryError, CarService, CarView, RegisterCarRequest,
};
use crate::domain::{Car, CarId, CarValidationError, Error, UserId};

fn map_repository_error(error: CarRepositoryError) -> Error {
    match error {
        CarRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("car repository unavailable: {message}"))
        }
        CarRepositoryError::Query { message } => {
            Error::internal(format!("car repository error: {message}"))
        }
    }
}

fn map_validation_error(error: CarValidationError) -> Error {
    let field = match &error {
        CarValidationError::EmptyField { field } | CarValidationError::FieldTooLong { field, .. } => {
            (*field).to_owned()
        }
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

/// Car service implementing the [`CarService`] driving port. Reads are
/// scoped to the owner; a foreign car reads as absent.
#[derive(Clone)]
pub struct CarServiceImpl<R> {
    cars: Arc<R>,
}

impl<R> CarServiceImpl<R> {
    /// Create a car service over the given repository.
    pub fn new(cars: Arc<R>) -> Self {
        Self { cars }
    }
}

#[async_trait]
impl<R> CarService for CarServiceImpl<R>
where
    R: CarRepository,
{
    async fn register_car(&self, request: RegisterCarRequest) -> Result<CarView, Error> {
        let car = Car::new(
            CarId::random(),
            request.owner,
            request.make,
            request.model,
            request.plate_number,
        )
        .map_err(map_validation_error)?;

        self.cars
            .insert(&car)
            .await
            .map_err(map_repository_error)?;
        Ok(CarView::from(car))
    }

    async fn get_car(&self, owner: UserId, car_id: CarId) -> Result<CarView, Error> {
        let car = self
            .cars
            .find_by_id(car_id)
            .await
            .map_err(map_repository_error)?
            .filter(|car| car.owner == owner)
            .ok_or_else(|| Error::not_found(format!("car {car_id} not found")))?;
        Ok(CarView::from(car))
    }

    async fn list_cars(&self, owner: UserId) -> Result<Vec<CarView>, Error> {
        let cars = self
            .cars
            .list_for_owner(owner)
            .await
            .map_err(map_repository_error)?;
        Ok(cars.into_iter().map(CarView::from).collect())
    }
}

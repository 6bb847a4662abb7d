//! Driven port for car persistence.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Car, CarId, UserId};

/// Errors raised by car repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CarRepositoryError {
    /// Repository connection could not be established.
    #[error("car repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("car repository query failed: {message}")]
    Query { message: String },
}

impl CarRepositoryError {
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

/// Port for writing and reading cars.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Persist a new car.
    async fn insert(&self, car: &Car) -> Result<(), CarRepositoryError>;

    /// Find a car by id.
    async fn find_by_id(&self, car_id: CarId) -> Result<Option<Car>, CarRepositoryError>;

    /// List a user's cars ordered by plate number.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Car>, CarRepositoryError>;
}

/// Mutex-guarded car store for tests and database-less deployments.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCarRepository {
    cars: Arc<Mutex<HashMap<Uuid, Car>>>,
}

impl InMemoryCarRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Car>> {
        match self.cars.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl CarRepository for InMemoryCarRepository {
    async fn insert(&self, car: &Car) -> Result<(), CarRepositoryError> {
        self.lock().insert(*car.id.as_uuid(), car.clone());
        Ok(())
    }

    async fn find_by_id(&self, car_id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        Ok(self.lock().get(car_id.as_uuid()).cloned())
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Car>, CarRepositoryError> {
        let mut cars: Vec<Car> = self
            .lock()
            .values()
            .filter(|car| car.owner == owner)
            .cloned()
            .collect();
        cars.sort_by(|a, b| a.plate_number.cmp(&b.plate_number));
        Ok(cars)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn listing_is_scoped_to_the_owner() {
        let repo = InMemoryCarRepository::new();
        let owner = UserId::random();
        let mine = Car::new(CarId::random(), owner, "Skoda", "Fabia", "AA11 AAA")
            .expect("valid car");
        let theirs = Car::new(CarId::random(), UserId::random(), "Seat", "Ibiza", "BB22 BBB")
            .expect("valid car");
        repo.insert(&mine).await.expect("insert");
        repo.insert(&theirs).await.expect("insert");

        let listed = repo.list_for_owner(owner).await.expect("list");
        assert_eq!(listed, vec![mine]);
    }
}

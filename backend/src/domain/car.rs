//! Car entity: a vehicle owned by exactly one user.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Stable car identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(Uuid);

impl CarId {
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

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors returned by [`Car::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CarValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
}

const MAKE_MODEL_MAX: usize = 50;
const PLATE_MAX: usize = 15;

/// A car registered by a user. Owned exclusively by that user; deleting the
/// owner cascades to their cars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    pub owner: UserId,
    pub make: String,
    pub model: String,
    pub plate_number: String,
}

fn check_field(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, CarValidationError> {
    if value.trim().is_empty() {
        return Err(CarValidationError::EmptyField { field });
    }
    if value.chars().count() > max {
        return Err(CarValidationError::FieldTooLong { field, max });
    }
    Ok(value)
}

impl Car {
    /// Validate field shape and construct a car.
    pub fn new(
        id: CarId,
        owner: UserId,
        make: impl Into<String>,
        model: impl Into<String>,
        plate_number: impl Into<String>,
    ) -> Result<Self, CarValidationError> {
        Ok(Self {
            id,
            owner,
            make: check_field(make.into(), "make", MAKE_MODEL_MAX)?,
            model: check_field(model.into(), "model", MAKE_MODEL_MAX)?,
            plate_number: check_field(plate_number.into(), "plate_number", PLATE_MAX)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn accepts_valid_car() {
        let car = Car::new(CarId::random(), UserId::random(), "Volvo", "V60", "AB12 CDE")
            .expect("valid car");
        assert_eq!(car.make, "Volvo");
    }

    #[rstest]
    #[case("", "V60", "AB12 CDE", "make")]
    #[case("Volvo", " ", "AB12 CDE", "model")]
    #[case("Volvo", "V60", "", "plate_number")]
    fn rejects_blank_fields(
        #[case] make: &str,
        #[case] model: &str,
        #[case] plate: &str,
        #[case] field: &str,
    ) {
        let err = Car::new(CarId::random(), UserId::random(), make, model, plate)
            .expect_err("invalid car");
        assert_eq!(err, CarValidationError::EmptyField {
            field: match field {
                "make" => "make",
                "model" => "model",
                _ => "plate_number",
            }
        });
    }

    #[rstest]
    fn rejects_oversized_plate() {
        let err = Car::new(
            CarId::random(),
            UserId::random(),
            "Volvo",
            "V60",
            "0123456789012345",
        )
        .expect_err("plate too long");
        assert!(matches!(err, CarValidationError::FieldTooLong {
            field: "plate_number",
            ..
        }));
    }
}

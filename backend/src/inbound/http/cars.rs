//! Car HTTP handlers.
//!
//! ```text
//! GET  /api/v1/cars
//! POST /api/v1/cars
//! GET  /api/v1/cars/{id}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CarView, RegisterCarRequest};
use crate::domain::{CarId, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

/// Car registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCarRequestBody {
    pub make: String,
    pub model: String,
    pub plate_number: String,
}

/// Car payload returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarResponseBody {
    #[schema(value_type = String, format = "uuid")]
    pub id: String,
    #[schema(value_type = String, format = "uuid")]
    pub owner: String,
    pub make: String,
    pub model: String,
    pub plate_number: String,
}

impl From<CarView> for CarResponseBody {
    fn from(view: CarView) -> Self {
        Self {
            id: view.id.to_string(),
            owner: view.owner.to_string(),
            make: view.make,
            model: view.model,
            plate_number: view.plate_number,
        }
    }
}

/// Register a car for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    request_body = RegisterCarRequestBody,
    responses(
        (status = 201, description = "Car registered", body = CarResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["cars"],
    operation_id = "registerCar",
    security(("SessionCookie" = []))
)]
#[post("/cars")]
pub async fn register_car(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterCarRequestBody>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let body = payload.into_inner();
    let view = state
        .cars
        .register_car(RegisterCarRequest {
            owner,
            make: body.make,
            model: body.model,
            plate_number: body.plate_number,
        })
        .await?;
    Ok(HttpResponse::Created().json(CarResponseBody::from(view)))
}

/// List the authenticated user's cars.
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    responses(
        (status = 200, description = "Cars", body = [CarResponseBody]),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["cars"],
    operation_id = "listCars",
    security(("SessionCookie" = []))
)]
#[get("/cars")]
pub async fn list_cars(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CarResponseBody>>> {
    let owner = session.require_user_id()?;
    let cars = state.cars.list_cars(owner).await?;
    Ok(web::Json(
        cars.into_iter().map(CarResponseBody::from).collect(),
    ))
}

/// Fetch one of the authenticated user's cars.
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    params(("id" = String, Path, format = "uuid", description = "Car id")),
    responses(
        (status = 200, description = "Car", body = CarResponseBody),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["cars"],
    operation_id = "getCar",
    security(("SessionCookie" = []))
)]
#[get("/cars/{id}")]
pub async fn get_car(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CarResponseBody>> {
    let owner = session.require_user_id()?;
    let car_id = CarId::from_uuid(parse_uuid(path.into_inner(), FieldName::new("id"))?);
    let view = state.cars.get_car(owner, car_id).await?;
    Ok(web::Json(CarResponseBody::from(view)))
}

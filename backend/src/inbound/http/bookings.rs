//! Booking HTTP handlers.
//!
//! ```text
//! GET    /api/v1/bookings
//! POST   /api/v1/bookings
//! GET    /api/v1/bookings/{id}
//! PUT    /api/v1/bookings/{id}
//! PATCH  /api/v1/bookings/{id}
//! DELETE /api/v1/bookings/{id}
//! ```
//!
//! PUT and PATCH share the partial-update handler: absent fields keep their
//! stored value either way.

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    BookingChanges, BookingView, CreateBookingRequest, DeleteBookingRequest, UpdateBookingRequest,
};
use crate::domain::{BookingId, CarId, Error, ZoneId};
use crate::inbound::http::cars::CarResponseBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_optional_rfc3339_timestamp, parse_optional_uuid, parse_rfc3339_timestamp, parse_uuid,
    FieldName,
};
use crate::inbound::http::zones::ZoneResponseBody;
use crate::inbound::http::ApiResult;

/// Booking creation request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequestBody {
    #[schema(value_type = String, format = "uuid")]
    pub car: String,
    #[schema(value_type = String, format = "uuid")]
    pub parking_zone: String,
    #[schema(format = "date-time")]
    pub start_time: String,
    #[schema(format = "date-time")]
    pub end_time: String,
}

/// Booking update request body; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequestBody {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub car: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub parking_zone: Option<String>,
    #[schema(format = "date-time")]
    pub start_time: Option<String>,
    #[schema(format = "date-time")]
    pub end_time: Option<String>,
}

/// Booking payload with nested car and zone snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponseBody {
    #[schema(value_type = String, format = "uuid")]
    pub id: String,
    #[schema(value_type = String, format = "uuid")]
    pub user: String,
    pub car: CarResponseBody,
    pub parking_zone: ZoneResponseBody,
    #[schema(format = "date-time")]
    pub start_time: String,
    #[schema(format = "date-time")]
    pub end_time: String,
    pub penalty: f64,
}

impl From<BookingView> for BookingResponseBody {
    fn from(view: BookingView) -> Self {
        Self {
            id: view.id.to_string(),
            user: view.user.to_string(),
            car: CarResponseBody::from(view.car),
            parking_zone: ZoneResponseBody::from(view.parking_zone),
            start_time: view.start_time.to_rfc3339(),
            end_time: view.end_time.to_rfc3339(),
            penalty: view.penalty,
        }
    }
}

fn parse_booking_id(raw: String) -> Result<BookingId, Error> {
    Ok(BookingId::from_uuid(parse_uuid(raw, FieldName::new("id"))?))
}

fn parse_changes(body: UpdateBookingRequestBody) -> Result<BookingChanges, Error> {
    Ok(BookingChanges {
        car: parse_optional_uuid(body.car, FieldName::new("car"))?.map(CarId::from_uuid),
        parking_zone: parse_optional_uuid(body.parking_zone, FieldName::new("parkingZone"))?
            .map(ZoneId::from_uuid),
        start_time: parse_optional_rfc3339_timestamp(body.start_time, FieldName::new("startTime"))?,
        end_time: parse_optional_rfc3339_timestamp(body.end_time, FieldName::new("endTime"))?,
    })
}

/// Create a booking for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequestBody,
    responses(
        (status = 201, description = "Booking created", body = BookingResponseBody),
        (status = 400, description = "Invalid request or zone full", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Car belongs to another user", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "createBooking",
    security(("SessionCookie" = []))
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateBookingRequestBody>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let body = payload.into_inner();
    let view = state
        .bookings
        .create_booking(CreateBookingRequest {
            user,
            car: CarId::from_uuid(parse_uuid(body.car, FieldName::new("car"))?),
            parking_zone: ZoneId::from_uuid(parse_uuid(
                body.parking_zone,
                FieldName::new("parkingZone"),
            )?),
            start_time: parse_rfc3339_timestamp(body.start_time, FieldName::new("startTime"))?,
            end_time: parse_rfc3339_timestamp(body.end_time, FieldName::new("endTime"))?,
        })
        .await?;
    Ok(HttpResponse::Created().json(BookingResponseBody::from(view)))
}

/// List the authenticated user's bookings ordered by start time.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    responses(
        (status = 200, description = "Bookings", body = [BookingResponseBody]),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "listBookings",
    security(("SessionCookie" = []))
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<BookingResponseBody>>> {
    let user = session.require_user_id()?;
    let bookings = state.bookings_query.list_bookings(user).await?;
    Ok(web::Json(
        bookings.into_iter().map(BookingResponseBody::from).collect(),
    ))
}

/// Fetch one of the authenticated user's bookings.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Booking id")),
    responses(
        (status = 200, description = "Booking", body = BookingResponseBody),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "getBooking",
    security(("SessionCookie" = []))
)]
#[get("/bookings/{id}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let user = session.require_user_id()?;
    let booking_id = parse_booking_id(path.into_inner())?;
    let view = state.bookings_query.get_booking(user, booking_id).await?;
    Ok(web::Json(BookingResponseBody::from(view)))
}

async fn apply_update(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateBookingRequestBody>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let user = session.require_user_id()?;
    let booking_id = parse_booking_id(path.into_inner())?;
    let changes = parse_changes(payload.into_inner())?;
    let view = state
        .bookings
        .update_booking(UpdateBookingRequest {
            user,
            booking_id,
            changes,
        })
        .await?;
    Ok(web::Json(BookingResponseBody::from(view)))
}

/// Update a booking (full replacement semantics are not enforced; absent
/// fields keep their stored value).
#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Booking id")),
    request_body = UpdateBookingRequestBody,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponseBody),
        (status = 400, description = "Invalid request or target zone full", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Car belongs to another user", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "replaceBooking",
    security(("SessionCookie" = []))
)]
#[put("/bookings/{id}")]
pub async fn replace_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateBookingRequestBody>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    apply_update(state, session, path, payload).await
}

/// Partially update a booking.
#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Booking id")),
    request_body = UpdateBookingRequestBody,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponseBody),
        (status = 400, description = "Invalid request or target zone full", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Car belongs to another user", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "patchBooking",
    security(("SessionCookie" = []))
)]
#[patch("/bookings/{id}")]
pub async fn patch_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateBookingRequestBody>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    apply_update(state, session, path, payload).await
}

/// Cancel a booking, releasing its reserved spot.
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Booking id")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "deleteBooking",
    security(("SessionCookie" = []))
)]
#[delete("/bookings/{id}")]
pub async fn delete_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let booking_id = parse_booking_id(path.into_inner())?;
    state
        .bookings
        .delete_booking(DeleteBookingRequest { user, booking_id })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;

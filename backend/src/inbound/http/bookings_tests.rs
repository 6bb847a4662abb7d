//! Handler-level tests for the booking endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App};
use serde_json::Value;

use super::*;
use crate::domain::ports::NoOpNotificationGateway;
use crate::inbound::http::auth::{register, RegisterRequestBody};
use crate::inbound::http::cars::{register_car, RegisterCarRequestBody};
use crate::inbound::http::zones::{create_zone, CreateZoneRequestBody};

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::in_memory(Arc::new(NoOpNotificationGateway));
    App::new()
        .app_data(web::Data::new(state))
        .wrap(crate::inbound::http::test_utils::test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(register)
                .service(register_car)
                .service(create_zone)
                .service(create_booking)
                .service(list_bookings)
                .service(get_booking)
                .service(replace_booking)
                .service(patch_booking)
                .service(delete_booking),
        )
}

async fn register_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    username: &str,
) -> actix_web::cookie::Cookie<'static> {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(RegisterRequestBody {
                username: username.to_owned(),
                password: "correct horse battery".to_owned(),
                email: format!("{username}@example.com"),
                phone_number: "07700900000".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn register_test_car(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    cookie: &actix_web::cookie::Cookie<'static>,
) -> String {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/cars")
            .cookie(cookie.clone())
            .set_json(RegisterCarRequestBody {
                make: "Skoda".to_owned(),
                model: "Fabia".to_owned(),
                plate_number: "AB12CDE".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    body.get("id")
        .and_then(Value::as_str)
        .expect("car id")
        .to_owned()
}

async fn create_test_zone(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    cookie: &actix_web::cookie::Cookie<'static>,
    total_spots: i32,
) -> String {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/parking-zones")
            .cookie(cookie.clone())
            .set_json(CreateZoneRequestBody {
                name: "North Quay".to_owned(),
                location: "Quay Street".to_owned(),
                total_spots,
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    body.get("id")
        .and_then(Value::as_str)
        .expect("zone id")
        .to_owned()
}

fn booking_json(car: &str, zone: &str, start: &str, end: &str) -> CreateBookingRequestBody {
    CreateBookingRequestBody {
        car: car.to_owned(),
        parking_zone: zone.to_owned(),
        start_time: start.to_owned(),
        end_time: end.to_owned(),
    }
}

#[actix_web::test]
async fn booking_lifecycle_on_a_single_spot_zone() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = register_user(&app, "morag").await;
    let car = register_test_car(&app, &cookie).await;
    let zone = create_test_zone(&app, &cookie, 1).await;

    // First booking takes the only spot.
    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/bookings")
            .cookie(cookie.clone())
            .set_json(booking_json(
                &car,
                &zone,
                "2025-06-01T09:00:00Z",
                "2025-06-01T11:00:00Z",
            ))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(created).await;
    assert_eq!(
        body.pointer("/parkingZone/availableSpots").and_then(Value::as_i64),
        Some(0)
    );
    assert_eq!(body.get("penalty").and_then(Value::as_f64), Some(0.0));
    let booking_id = body
        .get("id")
        .and_then(Value::as_str)
        .expect("booking id")
        .to_owned();

    // A second booking is rejected with the retryable capacity code.
    let conflicted = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/bookings")
            .cookie(cookie.clone())
            .set_json(booking_json(
                &car,
                &zone,
                "2025-06-01T12:00:00Z",
                "2025-06-01T13:00:00Z",
            ))
            .to_request(),
    )
    .await;
    assert_eq!(conflicted.status(), StatusCode::BAD_REQUEST);
    let err: Value = actix_test::read_body_json(conflicted).await;
    assert_eq!(err.pointer("/details/code").and_then(Value::as_str), Some("zone_full"));

    // Deleting frees the spot; rebooking succeeds.
    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/bookings/{booking_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let rebooked = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/bookings")
            .cookie(cookie)
            .set_json(booking_json(
                &car,
                &zone,
                "2025-06-01T12:00:00Z",
                "2025-06-01T13:00:00Z",
            ))
            .to_request(),
    )
    .await;
    assert_eq!(rebooked.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn short_bookings_carry_the_flat_penalty() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = register_user(&app, "morag").await;
    let car = register_test_car(&app, &cookie).await;
    let zone = create_test_zone(&app, &cookie, 2).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/bookings")
            .cookie(cookie)
            .set_json(booking_json(
                &car,
                &zone,
                "2025-06-01T09:00:00Z",
                "2025-06-01T09:29:00Z",
            ))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(created).await;
    assert_eq!(body.get("penalty").and_then(Value::as_f64), Some(50.0));
}

#[actix_web::test]
async fn booking_a_foreign_car_is_forbidden() {
    let app = actix_test::init_service(test_app()).await;
    let owner_cookie = register_user(&app, "morag").await;
    let stranger_cookie = register_user(&app, "hamish").await;
    let car = register_test_car(&app, &owner_cookie).await;
    let zone = create_test_zone(&app, &owner_cookie, 2).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/bookings")
            .cookie(stranger_cookie)
            .set_json(booking_json(
                &car,
                &zone,
                "2025-06-01T09:00:00Z",
                "2025-06-01T11:00:00Z",
            ))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn patch_shortening_a_booking_recomputes_the_penalty() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = register_user(&app, "morag").await;
    let car = register_test_car(&app, &cookie).await;
    let zone = create_test_zone(&app, &cookie, 2).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/bookings")
            .cookie(cookie.clone())
            .set_json(booking_json(
                &car,
                &zone,
                "2025-06-01T09:00:00Z",
                "2025-06-01T11:00:00Z",
            ))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(created).await;
    let booking_id = body.get("id").and_then(Value::as_str).expect("booking id");

    let patched = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/bookings/{booking_id}"))
            .cookie(cookie)
            .set_json(UpdateBookingRequestBody {
                end_time: Some("2025-06-01T09:20:00Z".to_owned()),
                ..UpdateBookingRequestBody::default()
            })
            .to_request(),
    )
    .await;
    assert_eq!(patched.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(patched).await;
    assert_eq!(body.get("penalty").and_then(Value::as_f64), Some(50.0));
}

#[actix_web::test]
async fn put_and_patch_share_partial_update_semantics() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = register_user(&app, "morag").await;
    let car = register_test_car(&app, &cookie).await;
    let zone = create_test_zone(&app, &cookie, 2).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/bookings")
            .cookie(cookie.clone())
            .set_json(booking_json(
                &car,
                &zone,
                "2025-06-01T09:00:00Z",
                "2025-06-01T11:00:00Z",
            ))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(created).await;
    let booking_id = body.get("id").and_then(Value::as_str).expect("booking id");

    // An empty PUT body leaves everything in place.
    let replaced = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/bookings/{booking_id}"))
            .cookie(cookie)
            .set_json(UpdateBookingRequestBody::default())
            .to_request(),
    )
    .await;
    assert_eq!(replaced.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(replaced).await;
    assert_eq!(
        body.get("startTime").and_then(Value::as_str),
        Some("2025-06-01T09:00:00+00:00")
    );
}

#[actix_web::test]
async fn bookings_are_scoped_to_their_owner() {
    let app = actix_test::init_service(test_app()).await;
    let owner_cookie = register_user(&app, "morag").await;
    let stranger_cookie = register_user(&app, "hamish").await;
    let car = register_test_car(&app, &owner_cookie).await;
    let zone = create_test_zone(&app, &owner_cookie, 2).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/bookings")
            .cookie(owner_cookie)
            .set_json(booking_json(
                &car,
                &zone,
                "2025-06-01T09:00:00Z",
                "2025-06-01T11:00:00Z",
            ))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(created).await;
    let booking_id = body.get("id").and_then(Value::as_str).expect("booking id");

    let foreign_get = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/bookings/{booking_id}"))
            .cookie(stranger_cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(foreign_get.status(), StatusCode::NOT_FOUND);

    let foreign_list = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/bookings")
            .cookie(stranger_cookie)
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(foreign_list).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn malformed_timestamps_are_rejected() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = register_user(&app, "morag").await;
    let car = register_test_car(&app, &cookie).await;
    let zone = create_test_zone(&app, &cookie, 2).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/bookings")
            .cookie(cookie)
            .set_json(booking_json(&car, &zone, "yesterday", "2025-06-01T11:00:00Z"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        err.pointer("/details/field").and_then(Value::as_str),
        Some("startTime")
    );
}

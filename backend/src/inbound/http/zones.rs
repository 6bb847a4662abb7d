//! Parking zone HTTP handlers.
//!
//! ```text
//! GET  /api/v1/parking-zones        (public)
//! GET  /api/v1/parking-zones/{id}   (public)
//! POST /api/v1/parking-zones
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateZoneRequest, ZoneView};
use crate::domain::{Error, ZoneId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

/// Zone creation request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateZoneRequestBody {
    pub name: String,
    pub location: String,
    pub total_spots: i32,
}

/// Zone payload returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneResponseBody {
    #[schema(value_type = String, format = "uuid")]
    pub id: String,
    pub name: String,
    pub location: String,
    pub total_spots: i32,
    pub available_spots: i32,
}

impl From<ZoneView> for ZoneResponseBody {
    fn from(view: ZoneView) -> Self {
        Self {
            id: view.id.to_string(),
            name: view.name,
            location: view.location,
            total_spots: view.total_spots,
            available_spots: view.available_spots,
        }
    }
}

/// Create a parking zone. Requires a session.
#[utoipa::path(
    post,
    path = "/api/v1/parking-zones",
    request_body = CreateZoneRequestBody,
    responses(
        (status = 201, description = "Zone created", body = ZoneResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["parking-zones"],
    operation_id = "createZone",
    security(("SessionCookie" = []))
)]
#[post("/parking-zones")]
pub async fn create_zone(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateZoneRequestBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let body = payload.into_inner();
    let view = state
        .zones
        .create_zone(CreateZoneRequest {
            name: body.name,
            location: body.location,
            total_spots: body.total_spots,
        })
        .await?;
    Ok(HttpResponse::Created().json(ZoneResponseBody::from(view)))
}

/// List all parking zones. Public: drivers browse zones before signing in.
#[utoipa::path(
    get,
    path = "/api/v1/parking-zones",
    responses(
        (status = 200, description = "Zones", body = [ZoneResponseBody])
    ),
    tags = ["parking-zones"],
    operation_id = "listZones",
    security([])
)]
#[get("/parking-zones")]
pub async fn list_zones(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ZoneResponseBody>>> {
    let zones = state.zones.list_zones().await?;
    Ok(web::Json(
        zones.into_iter().map(ZoneResponseBody::from).collect(),
    ))
}

/// Fetch a parking zone by id. Public.
#[utoipa::path(
    get,
    path = "/api/v1/parking-zones/{id}",
    params(("id" = String, Path, format = "uuid", description = "Zone id")),
    responses(
        (status = 200, description = "Zone", body = ZoneResponseBody),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["parking-zones"],
    operation_id = "getZone",
    security([])
)]
#[get("/parking-zones/{id}")]
pub async fn get_zone(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ZoneResponseBody>> {
    let zone_id = ZoneId::from_uuid(parse_uuid(path.into_inner(), FieldName::new("id"))?);
    let view = state.zones.get_zone(zone_id).await?;
    Ok(web::Json(ZoneResponseBody::from(view)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::NoOpNotificationGateway;
    use crate::inbound::http::auth::{register, RegisterRequestBody};

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
                    .service(create_zone)
                    .service(list_zones)
                    .service(get_zone),
            )
    }

    #[actix_web::test]
    async fn zone_reads_are_public() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/parking-zones")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn zone_creation_requires_a_session() {
        let app = actix_test::init_service(test_app()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/parking-zones")
                .set_json(CreateZoneRequestBody {
                    name: "North Quay".to_owned(),
                    location: "Quay Street".to_owned(),
                    total_spots: 8,
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn created_zones_are_publicly_readable() {
        let app = actix_test::init_service(test_app()).await;
        let registered = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(RegisterRequestBody {
                    username: "morag".to_owned(),
                    password: "correct horse battery".to_owned(),
                    email: "morag@example.com".to_owned(),
                    phone_number: "07700900000".to_owned(),
                })
                .to_request(),
        )
        .await;
        let cookie = registered
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/parking-zones")
                .cookie(cookie)
                .set_json(CreateZoneRequestBody {
                    name: "North Quay".to_owned(),
                    location: "Quay Street".to_owned(),
                    total_spots: 8,
                })
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(created).await;
        assert_eq!(body.get("availableSpots").and_then(Value::as_i64), Some(8));
        let zone_id = body.get("id").and_then(Value::as_str).expect("zone id");

        let fetched = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/parking-zones/{zone_id}"))
                .to_request(),
        )
        .await;
        assert_eq!(fetched.status(), StatusCode::OK);
    }
}

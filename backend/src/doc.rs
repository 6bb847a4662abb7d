//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and body schema into one
//! OpenAPI document. Swagger UI serves it in debug builds at `/docs`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{
    ChangePasswordRequestBody, LoginRequestBody, RegisterRequestBody, RegisterResponseBody,
    ResetPasswordRequestBody,
};
use crate::inbound::http::bookings::{
    BookingResponseBody, CreateBookingRequestBody, UpdateBookingRequestBody,
};
use crate::inbound::http::cars::{CarResponseBody, RegisterCarRequestBody};
use crate::inbound::http::zones::{CreateZoneRequestBody, ZoneResponseBody};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/register or /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Kerbside parking API",
        description = "Session-authenticated parking zones, cars, and bookings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::change_password,
        crate::inbound::http::auth::reset_password,
        crate::inbound::http::cars::register_car,
        crate::inbound::http::cars::list_cars,
        crate::inbound::http::cars::get_car,
        crate::inbound::http::zones::create_zone,
        crate::inbound::http::zones::list_zones,
        crate::inbound::http::zones::get_zone,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::replace_booking,
        crate::inbound::http::bookings::patch_booking,
        crate::inbound::http::bookings::delete_booking,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequestBody,
        RegisterResponseBody,
        LoginRequestBody,
        ChangePasswordRequestBody,
        ResetPasswordRequestBody,
        RegisterCarRequestBody,
        CarResponseBody,
        CreateZoneRequestBody,
        ZoneResponseBody,
        CreateBookingRequestBody,
        UpdateBookingRequestBody,
        BookingResponseBody,
    )),
    tags(
        (name = "auth", description = "Registration, login, and credential management"),
        (name = "cars", description = "Cars registered by the authenticated user"),
        (name = "parking-zones", description = "Zones and their spot availability"),
        (name = "bookings", description = "Time-boxed parking reservations"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

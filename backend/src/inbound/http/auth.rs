//! Authentication and account HTTP handlers.
//!
//! ```text
//! POST /api/v1/auth/register
//! POST /api/v1/auth/login
//! POST /api/v1/auth/logout
//! POST /api/v1/auth/change-password
//! POST /api/v1/auth/reset-password
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{Credentials, RegisterUserRequest};
use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone_number: String,
}

/// Registration response body.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponseBody {
    #[schema(value_type = String, format = "uuid")]
    pub id: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    pub username: String,
    pub password: String,
}

/// Change-password request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequestBody {
    pub old_password: String,
    pub new_password: String,
}

/// Reset-password request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequestBody {
    pub email: String,
}

/// Create an account and establish a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequestBody,
    responses(
        (status = 201, description = "Account created", body = RegisterResponseBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already registered", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let user_id = state
        .identity
        .register(RegisterUserRequest {
            username: body.username,
            password: body.password,
            email: body.email,
            phone_number: body.phone_number,
        })
        .await?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::Created().json(RegisterResponseBody {
        id: user_id.to_string(),
    }))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let user_id = state
        .identity
        .authenticate(&Credentials {
            username: body.username,
            password: body.password,
        })
        .await?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Drop the session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security(("SessionCookie" = []))
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Replace the authenticated user's password.
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    request_body = ChangePasswordRequestBody,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["auth"],
    operation_id = "changePassword",
    security(("SessionCookie" = []))
)]
#[post("/auth/change-password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ChangePasswordRequestBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = payload.into_inner();
    state
        .identity
        .change_password(user_id, &body.old_password, &body.new_password)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Start a password reset. The response shape never reveals whether the
/// email is registered.
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    request_body = ResetPasswordRequestBody,
    responses(
        (status = 204, description = "Reset initiated if the email is known")
    ),
    tags = ["auth"],
    operation_id = "resetPassword",
    security([])
)]
#[post("/auth/reset-password")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    payload: web::Json<ResetPasswordRequestBody>,
) -> ApiResult<HttpResponse> {
    state
        .identity
        .request_password_reset(&payload.into_inner().email)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

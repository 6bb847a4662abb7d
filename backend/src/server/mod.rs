//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::NoOpNotificationGateway;
use crate::domain::{
    BookingCommandService, BookingQueryService, CarServiceImpl, IdentityServiceImpl,
    ZoneServiceImpl,
};
use crate::inbound::http::auth::{change_password, login, logout, register, reset_password};
use crate::inbound::http::bookings::{
    create_booking, delete_booking, get_booking, list_bookings, patch_booking, replace_booking,
};
use crate::inbound::http::cars::{get_car, list_cars, register_car};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::zones::{create_zone, get_zone, list_zones};
use crate::middleware::Trace;
use crate::outbound::notification::HttpSmsGateway;
use crate::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselCarRepository, DieselInventoryLedger,
    DieselUserRepository, DieselZoneRepository,
};

fn diesel_http_state(
    pool: &DbPool,
    notifier: Arc<dyn crate::domain::ports::NotificationGateway>,
) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let bookings = Arc::new(DieselBookingRepository::new(pool.clone()));
    let cars = Arc::new(DieselCarRepository::new(pool.clone()));
    let zones = Arc::new(DieselZoneRepository::new(pool.clone()));
    let ledger = Arc::new(DieselInventoryLedger::new(pool.clone()));

    HttpState {
        identity: Arc::new(IdentityServiceImpl::new(users, notifier)),
        bookings: Arc::new(BookingCommandService::new(
            Arc::clone(&bookings),
            Arc::clone(&cars),
            Arc::clone(&zones),
            ledger,
        )),
        bookings_query: Arc::new(BookingQueryService::new(
            bookings,
            Arc::clone(&cars),
            Arc::clone(&zones),
        )),
        cars: Arc::new(CarServiceImpl::new(cars)),
        zones: Arc::new(ZoneServiceImpl::new(zones)),
    }
}

/// Build the HTTP dependency bundle from configuration: database-backed when
/// a pool is attached, in-memory otherwise.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let notifier: Arc<dyn crate::domain::ports::NotificationGateway> = match &config.sms_endpoint {
        Some(endpoint) => Arc::new(HttpSmsGateway::new(endpoint.clone())),
        None => Arc::new(NoOpNotificationGateway),
    };

    match &config.db_pool {
        Some(pool) => diesel_http_state(pool, notifier),
        None => HttpState::in_memory(notifier),
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(change_password)
        .service(reset_password)
        .service(register_car)
        .service(list_cars)
        .service(get_car)
        .service(create_zone)
        .service(list_zones)
        .service(get_zone)
        .service(create_booking)
        .service(list_bookings)
        .service(get_booking)
        .service(replace_booking)
        .service(patch_booking)
        .service(delete_booking);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
        sms_endpoint: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

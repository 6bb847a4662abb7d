//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. `created_at` is populated by column defaults and not read back,
//! so the row structs omit it.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bookings, cars, parking_zones, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub is_verified: bool,
    pub password_digest: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub is_verified: bool,
    pub password_digest: &'a str,
}

/// Row struct for reading from the cars table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CarRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub make: String,
    pub model: String,
    pub plate_number: String,
}

/// Insertable struct for creating new car records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cars)]
pub(crate) struct NewCarRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub make: &'a str,
    pub model: &'a str,
    pub plate_number: &'a str,
}

/// Row struct for reading from the parking_zones table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = parking_zones)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ZoneRow {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub total_spots: i32,
    pub available_spots: i32,
}

/// Insertable struct for creating new zone records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = parking_zones)]
pub(crate) struct NewZoneRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub location: &'a str,
    pub total_spots: i32,
    pub available_spots: i32,
}

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub zone_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub penalty: f64,
}

/// Insertable struct for creating new booking records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub zone_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub penalty: f64,
}

/// Changeset struct for updating existing booking records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = bookings)]
pub(crate) struct BookingUpdate {
    pub car_id: Uuid,
    pub zone_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub penalty: f64,
}

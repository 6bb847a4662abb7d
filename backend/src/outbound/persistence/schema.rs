//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name (max 150 characters).
        username -> Varchar,
        email -> Varchar,
        phone_number -> Varchar,
        is_verified -> Bool,
        /// Salted credential digest in `salt$digest` form.
        password_digest -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Cars registered by users.
    cars (id) {
        id -> Uuid,
        owner_id -> Uuid,
        make -> Varchar,
        model -> Varchar,
        plate_number -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Parking zones with their capacity counters.
    parking_zones (id) {
        id -> Uuid,
        name -> Varchar,
        location -> Varchar,
        total_spots -> Int4,
        /// Mutated only by the inventory ledger, via guarded updates.
        available_spots -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Time-boxed parking reservations.
    bookings (id) {
        id -> Uuid,
        user_id -> Uuid,
        car_id -> Uuid,
        zone_id -> Uuid,
        start_time -> Timestamptz,
        end_time -> Timestamptz,
        penalty -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(cars -> users (owner_id));
diesel::joinable!(bookings -> users (user_id));
diesel::joinable!(bookings -> cars (car_id));
diesel::joinable!(bookings -> parking_zones (zone_id));

diesel::allow_tables_to_appear_in_same_query!(users, cars, parking_zones, bookings);

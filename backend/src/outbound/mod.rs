//! Outbound adapters: persistence and notification delivery.

pub mod notification;
pub mod persistence;

//! Parking reservation backend.
//!
//! Hexagonal layout: `domain` holds the entities, ports, and services;
//! `inbound` adapts HTTP onto the driving ports; `outbound` adapts the driven
//! ports onto PostgreSQL and the SMS provider; `server` wires the pieces into
//! an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;

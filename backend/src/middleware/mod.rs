//! Request middleware for cross-cutting HTTP concerns.

pub mod trace;

pub use trace::Trace;

//! Outbound notification adapters.

mod http_sms_gateway;

pub use http_sms_gateway::HttpSmsGateway;

//! Infrastructure adapters and runtime bootstrap.

pub mod error;
pub mod http_client;
pub mod telemetry;

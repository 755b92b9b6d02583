//! Application layer for plausible-mcp
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; the analytics backend is reached through the
//! [`AnalyticsGateway`] port, implemented in the infrastructure layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::analytics_gateway::{AnalyticsGateway, GatewayError};
pub use use_cases::run_query::{RunQueryError, RunQueryUseCase};

//! Infrastructure layer for plausible-mcp
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod plausible;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, LoggingConfig, PlausibleConfig};
pub use plausible::PlausibleClient;

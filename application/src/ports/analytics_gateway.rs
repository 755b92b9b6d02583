//! Analytics gateway port
//!
//! Defines the interface for submitting validated queries to the analytics
//! backend.

use async_trait::async_trait;
use plausible_domain::{Query, QueryResult};
use thiserror::Error;

/// Errors that can occur while talking to the analytics backend
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),
}

impl GatewayError {
    /// True for errors worth retrying (transient network conditions and
    /// server-side failures), false for anything the caller must fix.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Network(_) | GatewayError::Timeout(_) => true,
            GatewayError::Api { status, .. } => *status >= 500,
            GatewayError::InvalidResponse(_) => false,
        }
    }
}

/// Gateway for executing analytics queries
///
/// This port defines how the application layer reaches the analytics API.
/// Implementations (adapters) live in the infrastructure layer. Queries
/// arriving here have already passed validation.
#[async_trait]
pub trait AnalyticsGateway: Send + Sync {
    /// Submit a validated query and return the parsed result.
    async fn execute_query(&self, query: &Query) -> Result<QueryResult, GatewayError>;
}

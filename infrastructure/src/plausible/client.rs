//! HTTP client for the analytics query API

use async_trait::async_trait;
use plausible_application::ports::analytics_gateway::{AnalyticsGateway, GatewayError};
use plausible_domain::{Query, QueryResult};
use std::time::Duration;
use tracing::{debug, warn};

/// Adapter that submits queries to a Plausible-compatible API over HTTPS.
///
/// Implements the [`AnalyticsGateway`] port. One instance is shared for the
/// lifetime of the server; the underlying connection pool is reused across
/// queries.
pub struct PlausibleClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl PlausibleClient {
    /// Build a client for the instance at `base_url`.
    ///
    /// Fails only if the HTTP client cannot be constructed (e.g. TLS setup).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs,
        })
    }

    fn classify_send_error(&self, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout(self.timeout_secs)
        } else {
            GatewayError::Network(error.to_string())
        }
    }
}

/// The query endpoint for an instance, tolerating trailing slashes.
fn endpoint(base_url: &str) -> String {
    format!("{}/api/v2/query", base_url.trim_end_matches('/'))
}

#[async_trait]
impl AnalyticsGateway for PlausibleClient {
    async fn execute_query(&self, query: &Query) -> Result<QueryResult, GatewayError> {
        let url = endpoint(&self.base_url);
        debug!(url = %url, site_id = %query.site_id, "Submitting analytics query");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(query)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Analytics API rejected the query");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<QueryResult>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

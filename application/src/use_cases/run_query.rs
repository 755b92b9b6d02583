//! Run query use case
//!
//! Validates raw parameters and submits the resulting query through the
//! analytics gateway.

use crate::ports::analytics_gateway::{AnalyticsGateway, GatewayError};
use plausible_domain::{QueryParams, QueryResult, ValidationError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while running a query
#[derive(Error, Debug)]
pub enum RunQueryError {
    /// The parameters violated a validation rule. Nothing was sent upstream.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The query was valid but the backend call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Use case for validating and executing an analytics query
pub struct RunQueryUseCase<G: AnalyticsGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: AnalyticsGateway + 'static> RunQueryUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Validate `params` and execute the query.
    ///
    /// Validation failures return before any network traffic, so an invalid
    /// query never reaches the backend.
    pub async fn execute(&self, params: QueryParams) -> Result<QueryResult, RunQueryError> {
        let query = params.validate().inspect_err(|e| {
            debug!(kind = %e.kind, "Query rejected by validation: {}", e.message);
        })?;

        info!(
            site_id = %query.site_id,
            metrics = query.metrics.len(),
            dimensions = query.dimensions.len(),
            filters = query.filters.len(),
            "Executing analytics query"
        );

        let result = self.gateway.execute_query(&query).await.inspect_err(|e| {
            warn!("Analytics query failed: {}", e);
        })?;

        debug!(rows = result.results.len(), "Query completed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use plausible_domain::{Query, ResultRow};
    use std::sync::Mutex;

    /// Gateway stub that records submitted queries and replays a canned
    /// response.
    struct StubGateway {
        response: Result<QueryResult, GatewayError>,
        submitted: Mutex<Vec<Query>>,
    }

    impl StubGateway {
        fn returning(response: Result<QueryResult, GatewayError>) -> Self {
            Self {
                response,
                submitted: Mutex::new(Vec::new()),
            }
        }

        fn submitted_count(&self) -> usize {
            self.submitted.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AnalyticsGateway for StubGateway {
        async fn execute_query(&self, query: &Query) -> Result<QueryResult, GatewayError> {
            self.submitted.lock().unwrap().push(query.clone());
            match &self.response {
                Ok(result) => Ok(result.clone()),
                Err(GatewayError::Timeout(secs)) => Err(GatewayError::Timeout(*secs)),
                Err(other) => Err(GatewayError::Network(other.to_string())),
            }
        }
    }

    fn sample_result() -> QueryResult {
        QueryResult {
            results: vec![ResultRow {
                dimensions: vec![],
                metrics: vec![serde_json::Number::from(42)],
            }],
            meta: Default::default(),
            query: serde_json::Value::Null,
        }
    }

    fn valid_params() -> QueryParams {
        QueryParams {
            site_id: Some("example.com".to_string()),
            metrics: Some(vec!["visitors".to_string()]),
            date_range: Some(plausible_domain::DateRangeParam::Shorthand("7d".to_string())),
            ..QueryParams::default()
        }
    }

    #[tokio::test]
    async fn test_valid_query_reaches_gateway() {
        let gateway = Arc::new(StubGateway::returning(Ok(sample_result())));
        let use_case = RunQueryUseCase::new(Arc::clone(&gateway));

        let result = use_case.execute(valid_params()).await.expect("should run");
        assert_eq!(result.results.len(), 1);
        assert_eq!(gateway.submitted_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_query_never_reaches_gateway() {
        let gateway = Arc::new(StubGateway::returning(Ok(sample_result())));
        let use_case = RunQueryUseCase::new(Arc::clone(&gateway));

        let params = QueryParams {
            metrics: Some(vec!["percentage".to_string()]),
            ..valid_params()
        };
        let err = use_case.execute(params).await.expect_err("invalid params");
        assert!(matches!(err, RunQueryError::Validation(_)));
        assert_eq!(gateway.submitted_count(), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let gateway = Arc::new(StubGateway::returning(Err(GatewayError::Timeout(30))));
        let use_case = RunQueryUseCase::new(Arc::clone(&gateway));

        let err = use_case
            .execute(valid_params())
            .await
            .expect_err("gateway fails");
        assert!(matches!(
            err,
            RunQueryError::Gateway(GatewayError::Timeout(30))
        ));
        assert_eq!(gateway.submitted_count(), 1);
    }

    #[tokio::test]
    async fn test_validation_error_text_preserved() {
        let gateway = Arc::new(StubGateway::returning(Ok(sample_result())));
        let use_case = RunQueryUseCase::new(gateway);

        let params = QueryParams {
            site_id: None,
            ..valid_params()
        };
        let err = use_case.execute(params).await.expect_err("missing site_id");
        assert!(err.to_string().contains("site_id"));
    }
}

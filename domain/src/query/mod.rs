//! Analytics query subdomain
//!
//! The life of a query:
//!
//! ```text
//! tool arguments ──► QueryParams ──validate()──► Query ──serialize──► API body
//!                                     │
//!                                     └─► ValidationError (first violated rule)
//! ```
//!
//! - [`request`] — raw parameters and the validated [`request::Query`]
//! - [`metrics`] — the metric vocabulary and its classifications
//! - [`dimensions`] — the dimension vocabulary and its classifications
//! - [`date_range`] — named periods and custom date windows
//! - [`result`] — response rows and metadata

pub mod date_range;
pub mod dimensions;
pub mod metrics;
pub mod request;
pub mod result;
mod validation;

pub use date_range::{DateRange, Period};
pub use metrics::Metric;
pub use request::{
    DateRangeParam, Include, Pagination, PaginationParams, Query, QueryParams, SortDirection,
};
pub use result::{QueryResult, ResultMeta, ResultRow};

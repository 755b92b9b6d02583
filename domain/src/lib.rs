//! Domain layer for plausible-mcp
//!
//! This crate contains the analytics query model: the vocabulary of metrics,
//! dimensions and date ranges, the filter expression engine, and the
//! validation rules that turn raw tool arguments into a query the API will
//! accept. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Query Validation
//!
//! Raw arguments arrive as [`QueryParams`] with everything optional. A single
//! call to [`QueryParams::validate`] applies the whole rule set in a fixed
//! order and either returns a typed [`Query`] or the first violated rule as a
//! [`ValidationError`]. Every error is produced before any network traffic.
//!
//! ## Filter Expressions
//!
//! Filters form a small recursive language (simple comparisons, `and` / `or`
//! / `not`, behavioral filters, saved segments). They are parsed once into a
//! [`FilterExpr`] tree at the validation boundary; dimension membership
//! checks and wire serialization both walk the typed tree.

pub mod core;
pub mod filter;
pub mod query;

// Re-export commonly used types
pub use core::error::{ValidationError, ValidationErrorKind};
pub use filter::{
    expr::{any_references, BehavioralFilter, FilterExpr, SimpleFilter},
    operator::{BehavioralOperator, FilterOperator},
    parsing::{parse_filter, parse_filters},
};
pub use query::{
    date_range::{DateRange, Period},
    metrics::Metric,
    request::{
        DateRangeParam, Include, Pagination, PaginationParams, Query, QueryParams, SortDirection,
        DEFAULT_PAGE_LIMIT,
    },
    result::{QueryResult, ResultMeta, ResultRow},
};

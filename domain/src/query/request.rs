//! Query input and its validated form
//!
//! [`QueryParams`] mirrors the tool arguments as they arrive: everything
//! optional, filters still raw JSON. [`QueryParams::validate`] applies the
//! rule set and produces a [`Query`], whose serialized form is exactly the
//! body expected by the analytics API.

use serde::{Deserialize, Serialize};

use super::date_range::DateRange;
use super::metrics::Metric;
use super::validation;
use crate::core::error::ValidationError;
use crate::filter::expr::{any_references, FilterExpr};

/// Default page size applied when pagination is requested without a limit.
pub const DEFAULT_PAGE_LIMIT: u64 = 10_000;

/// Sort direction for `order_by` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!(
                "Sort direction must be 'asc' or 'desc', got '{}'",
                other
            )),
        }
    }
}

/// Extra response data the caller can opt into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Include {
    /// Merge imported (pre-migration) stats into the results.
    pub imports: bool,
    /// Return one label per time bucket; requires a time dimension.
    pub time_labels: bool,
    /// Return the total row count before pagination.
    pub total_rows: bool,
}

impl Include {
    /// True when no flag is set, so the field can be omitted on the wire.
    pub fn is_empty(&self) -> bool {
        !(self.imports || self.time_labels || self.total_rows)
    }
}

/// Raw pagination input; bounds are checked during validation.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

/// Raw `date_range` input: a named shorthand or a `[start, end]` pair.
///
/// The pair arm keeps raw JSON values so that validation can report what was
/// actually sent instead of a generic deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DateRangeParam {
    Shorthand(String),
    Custom(Vec<serde_json::Value>),
}

/// Tool arguments for an analytics query, prior to validation.
///
/// All fields are optional at this layer. Which ones are actually required,
/// and how they may be combined, is decided by [`QueryParams::validate`] so
/// that missing fields produce domain errors rather than serde errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    pub site_id: Option<String>,
    pub metrics: Option<Vec<String>>,
    pub date_range: Option<DateRangeParam>,
    pub dimensions: Option<Vec<String>>,
    pub filters: Option<Vec<serde_json::Value>>,
    pub order_by: Option<Vec<(String, String)>>,
    pub include: Option<Include>,
    pub pagination: Option<PaginationParams>,
}

impl QueryParams {
    /// Validate into a [`Query`], failing on the first violated rule.
    ///
    /// Required fields are checked before anything else, then shapes
    /// (date range, dimensions, filters, order, pagination), then the
    /// semantic rules tying metrics to dimensions.
    pub fn validate(self) -> Result<Query, ValidationError> {
        validation::validate_params(self)
    }
}

/// A validated query, ready to submit.
///
/// Construction goes through [`QueryParams::validate`]; the serialized form
/// is the API request body, with empty optional parts omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub site_id: String,
    pub metrics: Vec<Metric>,
    pub date_range: DateRange,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterExpr>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<(String, SortDirection)>,
    #[serde(skip_serializing_if = "Include::is_empty")]
    pub include: Include,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl Query {
    /// True when `dimension` appears in the dimension list or is targeted by
    /// any filter. Metric preconditions accept either form of presence.
    pub fn has_dimension_or_filter(&self, dimension: &str) -> bool {
        self.dimensions.iter().any(|d| d == dimension)
            || any_references(&self.filters, dimension)
    }

    /// Re-run the semantic rules on an already-built query.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::check_semantics(self)
    }
}

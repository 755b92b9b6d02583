//! Query validation rules
//!
//! Validation is sequential and stops at the first violated rule:
//!
//! 1. Required fields (`site_id`, `metrics`, `date_range`), each with its
//!    own error
//! 2. Shape checks: date range, metric names, dimension names, filters,
//!    order, pagination
//! 3. Semantic rules tying metrics to the dimensions they need:
//!    - `percentage` needs at least one dimension
//!    - `scroll_depth` / `time_on_page` need `event:page` as a dimension or
//!      filter target
//!    - `conversion_rate` / `group_conversion_rate` need `event:goal`
//!    - `average_revenue` / `total_revenue` need `event:goal` (revenue goals)
//!    - session metrics cannot mix with `event:*` or `time` dimensions
//!    - `include.time_labels` needs a time dimension
//!
//! The same inputs always produce the same verdict; nothing here looks at
//! the clock or any other ambient state.

use super::date_range::{DateRange, Period};
use super::dimensions;
use super::metrics::Metric;
use super::request::{
    DateRangeParam, Pagination, PaginationParams, Query, QueryParams, SortDirection,
    DEFAULT_PAGE_LIMIT,
};
use crate::core::error::{ValidationError, ValidationErrorKind};
use crate::filter::parsing::parse_filters;

pub(crate) fn validate_params(params: QueryParams) -> Result<Query, ValidationError> {
    let site_id = params
        .site_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ValidationError::missing_field("site_id"))?;
    let raw_metrics = params
        .metrics
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ValidationError::missing_field("metrics"))?;
    let raw_range = params
        .date_range
        .ok_or_else(|| ValidationError::missing_field("date_range"))?;

    let date_range = parse_date_range(&raw_range)?;
    let metrics = parse_metrics(&raw_metrics)?;
    let dimensions = check_dimensions(params.dimensions.unwrap_or_default())?;
    let filters = parse_filters(&params.filters.unwrap_or_default())?;
    let order_by = parse_order_by(params.order_by.unwrap_or_default())?;
    let pagination = params.pagination.map(parse_pagination).transpose()?;

    let query = Query {
        site_id,
        metrics,
        date_range,
        dimensions,
        filters,
        order_by,
        include: params.include.unwrap_or_default(),
        pagination,
    };
    check_semantics(&query)?;
    Ok(query)
}

/// The semantic rules, in order. Shared by initial validation and
/// [`Query::validate`] re-checks.
pub(crate) fn check_semantics(query: &Query) -> Result<(), ValidationError> {
    check_percentage(query)?;
    check_page_scoped_metrics(query)?;
    check_goal_scoped_metrics(query)?;
    check_revenue_metrics(query)?;
    check_session_metric_conflicts(query)?;
    check_time_labels(query)?;
    Ok(())
}

// ==================== Shape checks ====================

fn parse_date_range(raw: &DateRangeParam) -> Result<DateRange, ValidationError> {
    match raw {
        DateRangeParam::Shorthand(s) => {
            let period = s.parse::<Period>().map_err(|message| {
                ValidationError::invalid_date_range(message).with_details(format!(
                    "Valid shorthands: {}",
                    Period::ALL
                        .iter()
                        .map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })?;
            Ok(DateRange::Period(period))
        }
        DateRangeParam::Custom(items) => {
            if items.len() != 2 {
                return Err(ValidationError::invalid_date_range(format!(
                    "Custom date ranges must be [start, end], got {} elements",
                    items.len()
                ))
                .with_details("Example: [\"2024-01-01\", \"2024-01-31\"]"));
            }
            let start = date_string(&items[0])?;
            let end = date_string(&items[1])?;
            DateRange::parse_custom(start, end)
        }
    }
}

fn date_string(value: &serde_json::Value) -> Result<&str, ValidationError> {
    value.as_str().ok_or_else(|| {
        ValidationError::invalid_date_range(format!(
            "Custom date range entries must be ISO-8601 strings, got: {}",
            value
        ))
    })
}

fn parse_metrics(raw: &[String]) -> Result<Vec<Metric>, ValidationError> {
    raw.iter()
        .map(|name| {
            name.parse::<Metric>().map_err(|message| {
                ValidationError::invalid_parameter(message).with_details(format!(
                    "Valid metrics: {}",
                    Metric::ALL
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
        })
        .collect()
}

fn check_dimensions(raw: Vec<String>) -> Result<Vec<String>, ValidationError> {
    for dimension in &raw {
        if !dimensions::is_known_dimension(dimension) {
            return Err(ValidationError::invalid_dimension(format!(
                "Unknown dimension: '{}'",
                dimension
            ))
            .with_details(
                "Dimensions are the event:*, visit:* and time identifiers, \
                 or event:props:<name> for custom properties",
            ));
        }
    }
    Ok(raw)
}

fn parse_order_by(
    raw: Vec<(String, String)>,
) -> Result<Vec<(String, SortDirection)>, ValidationError> {
    raw.into_iter()
        .map(|(field, direction)| {
            let direction = direction
                .parse::<SortDirection>()
                .map_err(ValidationError::invalid_parameter)?;
            Ok((field, direction))
        })
        .collect()
}

fn parse_pagination(raw: PaginationParams) -> Result<Pagination, ValidationError> {
    let limit = non_negative("pagination.limit", raw.limit)?.unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = non_negative("pagination.offset", raw.offset)?.unwrap_or(0);
    Ok(Pagination { limit, offset })
}

fn non_negative(field: &str, value: Option<i64>) -> Result<Option<u64>, ValidationError> {
    match value {
        None => Ok(None),
        Some(n) if n >= 0 => Ok(Some(n as u64)),
        Some(n) => Err(ValidationError::invalid_parameter(format!(
            "{} must be non-negative, got {}",
            field, n
        ))),
    }
}

// ==================== Semantic rules ====================

fn check_percentage(query: &Query) -> Result<(), ValidationError> {
    if query.metrics.contains(&Metric::Percentage) && query.dimensions.is_empty() {
        return Err(ValidationError::new(
            ValidationErrorKind::MetricRequiresDimensionOrFilter,
            "Metric 'percentage' requires at least one dimension",
        )
        .with_details("Percentages are shares of a breakdown, so there must be something to break down by"));
    }
    Ok(())
}

fn check_page_scoped_metrics(query: &Query) -> Result<(), ValidationError> {
    for metric in &query.metrics {
        if metric.requires_page_scope() && !query.has_dimension_or_filter("event:page") {
            return Err(ValidationError::new(
                ValidationErrorKind::MetricRequiresDimensionOrFilter,
                format!(
                    "Metric '{}' requires the 'event:page' dimension or a filter on it",
                    metric
                ),
            )
            .with_details(
                "Add 'event:page' to dimensions, or a filter such as [\"event:page\", \"is\", [\"/path\"]]",
            ));
        }
    }
    Ok(())
}

fn check_goal_scoped_metrics(query: &Query) -> Result<(), ValidationError> {
    for metric in &query.metrics {
        if metric.requires_goal_scope() && !query.has_dimension_or_filter("event:goal") {
            return Err(ValidationError::new(
                ValidationErrorKind::MetricRequiresDimensionOrFilter,
                format!(
                    "Metric '{}' requires the 'event:goal' dimension or a filter on it",
                    metric
                ),
            )
            .with_details(
                "Conversion rates are relative to a goal; add 'event:goal' to dimensions or filter on it",
            ));
        }
    }
    Ok(())
}

fn check_revenue_metrics(query: &Query) -> Result<(), ValidationError> {
    for metric in &query.metrics {
        if metric.is_revenue_metric() && !query.has_dimension_or_filter("event:goal") {
            return Err(ValidationError::new(
                ValidationErrorKind::MetricRequiresDimensionOrFilter,
                format!(
                    "Metric '{}' requires a revenue goal: add the 'event:goal' dimension or a filter on it",
                    metric
                ),
            )
            .with_details(
                "Revenue metrics are only defined for goals with revenue tracking",
            ));
        }
    }
    Ok(())
}

fn check_session_metric_conflicts(query: &Query) -> Result<(), ValidationError> {
    let session_metrics = unique_names(
        query
            .metrics
            .iter()
            .filter(|m| m.is_session_metric())
            .map(|m| m.as_str()),
    );
    if session_metrics.is_empty() {
        return Ok(());
    }

    let conflicting_dimensions = unique_names(
        query
            .dimensions
            .iter()
            .map(String::as_str)
            .filter(|d| dimensions::is_event_scoped(d) || dimensions::is_time_scoped(d)),
    );
    if conflicting_dimensions.is_empty() {
        return Ok(());
    }

    Err(ValidationError::new(
        ValidationErrorKind::SessionMetricConflict,
        format!(
            "Session metrics ({}) cannot be combined with event or time dimensions ({})",
            session_metrics.join(", "),
            conflicting_dimensions.join(", ")
        ),
    )
    .with_details(
        "Session metrics are aggregated per visit; break down by visit:* dimensions instead, \
         or drop the session metrics",
    ))
}

fn check_time_labels(query: &Query) -> Result<(), ValidationError> {
    if query.include.time_labels
        && !query
            .dimensions
            .iter()
            .any(|d| dimensions::is_time_scoped(d))
    {
        return Err(ValidationError::new(
            ValidationErrorKind::TimeLabelsRequireTimeDimension,
            "include.time_labels requires a time dimension",
        )
        .with_details("Add 'time' or one of the time:* dimensions (e.g. 'time:day')"));
    }
    Ok(())
}

/// Names in first-seen order, without duplicates. Inputs are tiny.
fn unique_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

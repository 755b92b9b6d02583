//! Error types for query validation

use serde::{Deserialize, Serialize};

/// Machine-readable category for a [`ValidationError`].
///
/// Every rule the validator enforces maps to exactly one kind, so callers
/// can branch on the category without parsing the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A required parameter (`site_id`, `metrics`, `date_range`) is absent or empty.
    MissingRequiredField,
    /// The date range shorthand is unknown, or a custom range is malformed.
    InvalidDateRange,
    /// A dimension identifier is not part of the known set.
    InvalidDimension,
    /// A filter expression does not match any accepted shape.
    InvalidFilter,
    /// A parameter value is out of range or not in the accepted vocabulary.
    InvalidParameter,
    /// A metric is missing the dimension (or filter target) it depends on.
    MetricRequiresDimensionOrFilter,
    /// Session-level metrics were combined with event or time dimensions.
    SessionMetricConflict,
    /// `include.time_labels` was set without a time dimension.
    TimeLabelsRequireTimeDimension,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingRequiredField => "missing_required_field",
            ValidationErrorKind::InvalidDateRange => "invalid_date_range",
            ValidationErrorKind::InvalidDimension => "invalid_dimension",
            ValidationErrorKind::InvalidFilter => "invalid_filter",
            ValidationErrorKind::InvalidParameter => "invalid_parameter",
            ValidationErrorKind::MetricRequiresDimensionOrFilter => {
                "metric_requires_dimension_or_filter"
            }
            ValidationErrorKind::SessionMetricConflict => "session_metric_conflict",
            ValidationErrorKind::TimeLabelsRequireTimeDimension => {
                "time_labels_require_time_dimension"
            }
        }
    }
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error describing why a query was rejected.
///
/// Validation stops at the first violated rule, so a query produces at most
/// one `ValidationError`. The `message` names the offending parts of the
/// query; `details` carries an optional hint on how to fix it.
///
/// # Examples
///
/// ```
/// use plausible_domain::core::error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::missing_field("site_id");
/// assert_eq!(err.kind, ValidationErrorKind::MissingRequiredField);
/// assert!(err.message.contains("site_id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// A required parameter is absent (or present but empty).
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ValidationErrorKind::MissingRequiredField,
            format!("Missing required parameter: '{}'", field),
        )
        .with_details(format!(
            "The '{}' parameter must be provided and non-empty",
            field
        ))
    }

    pub fn invalid_date_range(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidDateRange, message)
    }

    pub fn invalid_dimension(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidDimension, message)
    }

    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidFilter, message)
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidParameter, message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

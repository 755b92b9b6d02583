//! Metric identifiers accepted by the analytics API

use serde::{Deserialize, Serialize};

/// A metric that can be requested in a query.
///
/// Metrics fall into a few families with different preconditions:
///
/// | Family | Metrics | Precondition |
/// |--------|---------|--------------|
/// | Counts | `visitors`, `visits`, `pageviews`, `events` | none |
/// | Session | `bounce_rate`, `views_per_visit`, `visit_duration` | no `event:`/`time:` dimensions |
/// | Page-scoped | `scroll_depth`, `time_on_page` | `event:page` dimension or filter |
/// | Share | `percentage` | at least one dimension |
/// | Goal | `conversion_rate`, `group_conversion_rate` | `event:goal` dimension or filter |
/// | Revenue | `average_revenue`, `total_revenue` | `event:goal` scoped to revenue goals |
///
/// The preconditions themselves are enforced by query validation, not here.
///
/// # Examples
///
/// ```
/// use plausible_domain::query::metrics::Metric;
///
/// let metric: Metric = "bounce_rate".parse().unwrap();
/// assert_eq!(metric, Metric::BounceRate);
/// assert!(metric.is_session_metric());
/// assert_eq!(metric.as_str(), "bounce_rate");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Visitors,
    Visits,
    Pageviews,
    ViewsPerVisit,
    BounceRate,
    VisitDuration,
    Events,
    ScrollDepth,
    TimeOnPage,
    Percentage,
    ConversionRate,
    GroupConversionRate,
    AverageRevenue,
    TotalRevenue,
}

impl Metric {
    /// Every supported metric, in the order surfaced to clients.
    pub const ALL: [Metric; 14] = [
        Metric::Visitors,
        Metric::Visits,
        Metric::Pageviews,
        Metric::ViewsPerVisit,
        Metric::BounceRate,
        Metric::VisitDuration,
        Metric::Events,
        Metric::ScrollDepth,
        Metric::TimeOnPage,
        Metric::Percentage,
        Metric::ConversionRate,
        Metric::GroupConversionRate,
        Metric::AverageRevenue,
        Metric::TotalRevenue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Visitors => "visitors",
            Metric::Visits => "visits",
            Metric::Pageviews => "pageviews",
            Metric::ViewsPerVisit => "views_per_visit",
            Metric::BounceRate => "bounce_rate",
            Metric::VisitDuration => "visit_duration",
            Metric::Events => "events",
            Metric::ScrollDepth => "scroll_depth",
            Metric::TimeOnPage => "time_on_page",
            Metric::Percentage => "percentage",
            Metric::ConversionRate => "conversion_rate",
            Metric::GroupConversionRate => "group_conversion_rate",
            Metric::AverageRevenue => "average_revenue",
            Metric::TotalRevenue => "total_revenue",
        }
    }

    /// Session metrics are aggregated per visit and cannot be broken down
    /// by event or time dimensions.
    pub fn is_session_metric(&self) -> bool {
        matches!(
            self,
            Metric::BounceRate | Metric::ViewsPerVisit | Metric::VisitDuration
        )
    }

    /// Metrics that are only defined relative to a page, so the query must
    /// mention `event:page` somewhere.
    pub fn requires_page_scope(&self) -> bool {
        matches!(self, Metric::ScrollDepth | Metric::TimeOnPage)
    }

    /// Metrics that are only defined relative to a goal, so the query must
    /// mention `event:goal` somewhere.
    pub fn requires_goal_scope(&self) -> bool {
        matches!(self, Metric::ConversionRate | Metric::GroupConversionRate)
    }

    /// Revenue metrics also require `event:goal`, scoped to revenue goals.
    pub fn is_revenue_metric(&self) -> bool {
        matches!(self, Metric::AverageRevenue | Metric::TotalRevenue)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown metric: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_metrics() {
        for metric in Metric::ALL {
            let parsed: Metric = metric.as_str().parse().expect("parse back");
            assert_eq!(parsed, metric);
        }
    }

    #[test]
    fn test_unknown_metric_rejected() {
        let result = "visitz".parse::<Metric>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("visitz"));
    }

    #[test]
    fn test_session_metric_classification() {
        assert!(Metric::BounceRate.is_session_metric());
        assert!(Metric::ViewsPerVisit.is_session_metric());
        assert!(Metric::VisitDuration.is_session_metric());
        assert!(!Metric::Visitors.is_session_metric());
        assert!(!Metric::Percentage.is_session_metric());
    }

    #[test]
    fn test_scope_requirements() {
        assert!(Metric::ScrollDepth.requires_page_scope());
        assert!(Metric::TimeOnPage.requires_page_scope());
        assert!(Metric::ConversionRate.requires_goal_scope());
        assert!(Metric::GroupConversionRate.requires_goal_scope());
        assert!(Metric::AverageRevenue.is_revenue_metric());
        assert!(Metric::TotalRevenue.is_revenue_metric());
        assert!(!Metric::Pageviews.requires_page_scope());
        assert!(!Metric::Events.requires_goal_scope());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Metric::ViewsPerVisit).expect("serialize");
        assert_eq!(json, "\"views_per_visit\"");
        let metric: Metric = serde_json::from_str("\"scroll_depth\"").expect("deserialize");
        assert_eq!(metric, Metric::ScrollDepth);
    }
}

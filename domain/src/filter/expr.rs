//! Filter expression tree
//!
//! Filters arrive as JSON arrays and form a small recursive language:
//!
//! ```text
//! FilterExpr
//! ├── Simple       [dimension, operator, values, case_sensitive?]
//! ├── And / Or     ["and" | "or", [child, child, ...]]
//! ├── Not          ["not", child]
//! ├── Behavioral   ["has_done" | "has_not_done", simple]
//! └── Segment      ["is", "segment", [ids]]
//! ```
//!
//! The enum is closed: every traversal matches all six shapes exhaustively,
//! so adding a variant forces each site to decide how to handle it.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::operator::{BehavioralOperator, FilterOperator};
use crate::core::error::ValidationError;

/// A leaf comparison against one dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleFilter {
    pub dimension: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
    /// String matching is case-sensitive unless this is `Some(false)`.
    pub case_sensitive: Option<bool>,
}

impl SimpleFilter {
    pub fn new(
        dimension: impl Into<String>,
        operator: FilterOperator,
        values: Vec<String>,
    ) -> Self {
        Self {
            dimension: dimension.into(),
            operator,
            values,
            case_sensitive: None,
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }
}

/// A filter on visitor behavior: whether the visitor did (or did not do)
/// something matching the inner comparison during the queried period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehavioralFilter {
    pub operator: BehavioralOperator,
    pub inner: SimpleFilter,
}

/// A parsed filter expression.
///
/// # Examples
///
/// ```
/// use plausible_domain::filter::expr::{FilterExpr, SimpleFilter};
/// use plausible_domain::filter::operator::FilterOperator;
///
/// let filter = FilterExpr::Not(Box::new(FilterExpr::Simple(SimpleFilter::new(
///     "visit:country",
///     FilterOperator::Is,
///     vec!["DE".to_string()],
/// ))));
///
/// assert!(filter.references_dimension("visit:country"));
/// assert!(!filter.references_dimension("visit:city"));
/// assert_eq!(
///     serde_json::to_string(&filter).unwrap(),
///     r#"["not",["visit:country","is",["DE"]]]"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Simple(SimpleFilter),
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    Not(Box<FilterExpr>),
    Behavioral(BehavioralFilter),
    /// Saved segment references. Their member filters live server-side, so
    /// the expression is opaque here.
    Segment(Vec<i64>),
}

impl FilterExpr {
    /// Parses one wire-format array into a typed expression.
    ///
    /// See [`super::parsing`] for the accepted shapes and error reporting.
    ///
    /// ```
    /// use plausible_domain::filter::expr::FilterExpr;
    /// use serde_json::json;
    ///
    /// let filter = FilterExpr::from_value(&json!(["event:page", "is", ["/pricing"]])).unwrap();
    /// assert!(filter.references_dimension("event:page"));
    /// ```
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ValidationError> {
        super::parsing::parse_filter(value)
    }

    /// Depth-first check whether any leaf targets `dimension`.
    ///
    /// Dimension names are compared exactly and case-sensitively. `and` and
    /// `or` contribute alike (presence, not truth, is what matters), `not`
    /// recurses into its child, and segments never match because their
    /// contents are not visible here.
    pub fn references_dimension(&self, dimension: &str) -> bool {
        match self {
            FilterExpr::Simple(filter) => filter.dimension == dimension,
            FilterExpr::And(children) | FilterExpr::Or(children) => children
                .iter()
                .any(|child| child.references_dimension(dimension)),
            FilterExpr::Not(child) => child.references_dimension(dimension),
            FilterExpr::Behavioral(behavioral) => behavioral.inner.dimension == dimension,
            FilterExpr::Segment(_) => false,
        }
    }
}

/// True when any expression in `filters` references `dimension`.
pub fn any_references(filters: &[FilterExpr], dimension: &str) -> bool {
    filters
        .iter()
        .any(|filter| filter.references_dimension(dimension))
}

impl Serialize for SimpleFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.case_sensitive.is_some() { 4 } else { 3 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.dimension)?;
        seq.serialize_element(&self.operator)?;
        seq.serialize_element(&self.values)?;
        if let Some(case_sensitive) = self.case_sensitive {
            seq.serialize_element(&case_sensitive)?;
        }
        seq.end()
    }
}

impl Serialize for FilterExpr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FilterExpr::Simple(filter) => filter.serialize(serializer),
            FilterExpr::And(children) => serialize_logical(serializer, "and", children),
            FilterExpr::Or(children) => serialize_logical(serializer, "or", children),
            FilterExpr::Not(child) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("not")?;
                seq.serialize_element(child.as_ref())?;
                seq.end()
            }
            FilterExpr::Behavioral(behavioral) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&behavioral.operator)?;
                seq.serialize_element(&behavioral.inner)?;
                seq.end()
            }
            FilterExpr::Segment(ids) => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("is")?;
                seq.serialize_element("segment")?;
                seq.serialize_element(ids)?;
                seq.end()
            }
        }
    }
}

fn serialize_logical<S>(
    serializer: S,
    keyword: &str,
    children: &[FilterExpr],
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(2))?;
    seq.serialize_element(keyword)?;
    seq.serialize_element(children)?;
    seq.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_is(path: &str) -> FilterExpr {
        FilterExpr::Simple(SimpleFilter::new(
            "event:page",
            FilterOperator::Is,
            vec![path.to_string()],
        ))
    }

    fn country_is(code: &str) -> FilterExpr {
        FilterExpr::Simple(SimpleFilter::new(
            "visit:country",
            FilterOperator::Is,
            vec![code.to_string()],
        ))
    }

    // ==================== Dimension Search ====================

    #[test]
    fn test_simple_matches_exact_dimension() {
        let filter = page_is("/pricing");
        assert!(filter.references_dimension("event:page"));
        assert!(!filter.references_dimension("event:pag"));
        assert!(!filter.references_dimension("Event:Page"));
    }

    #[test]
    fn test_logical_children_searched() {
        let filter = FilterExpr::And(vec![country_is("DE"), page_is("/docs")]);
        assert!(filter.references_dimension("event:page"));
        assert!(filter.references_dimension("visit:country"));
        assert!(!filter.references_dimension("event:goal"));

        let filter = FilterExpr::Or(vec![country_is("DE"), page_is("/docs")]);
        assert!(filter.references_dimension("event:page"));
    }

    #[test]
    fn test_negation_still_counts_as_reference() {
        let filter = FilterExpr::Not(Box::new(page_is("/admin")));
        assert!(filter.references_dimension("event:page"));
    }

    #[test]
    fn test_deep_nesting() {
        let filter = FilterExpr::And(vec![
            country_is("DE"),
            FilterExpr::Or(vec![
                FilterExpr::Not(Box::new(page_is("/404"))),
                country_is("AT"),
            ]),
        ]);
        assert!(filter.references_dimension("event:page"));
    }

    #[test]
    fn test_behavioral_inner_dimension_visible() {
        let filter = FilterExpr::Behavioral(BehavioralFilter {
            operator: BehavioralOperator::HasDone,
            inner: SimpleFilter::new("event:goal", FilterOperator::Is, vec!["Signup".into()]),
        });
        assert!(filter.references_dimension("event:goal"));
        assert!(!filter.references_dimension("event:page"));
    }

    #[test]
    fn test_segment_is_opaque() {
        let filter = FilterExpr::Segment(vec![12, 34]);
        assert!(!filter.references_dimension("event:page"));
        assert!(!filter.references_dimension("segment"));
    }

    #[test]
    fn test_any_references_over_list() {
        let filters = vec![country_is("DE"), page_is("/docs")];
        assert!(any_references(&filters, "event:page"));
        assert!(!any_references(&filters, "event:goal"));
        assert!(!any_references(&[], "event:page"));
    }

    // ==================== Wire Serialization ====================

    #[test]
    fn test_simple_serializes_as_triple() {
        let value = serde_json::to_value(page_is("/pricing")).expect("json");
        assert_eq!(value, json!(["event:page", "is", ["/pricing"]]));
    }

    #[test]
    fn test_case_sensitive_flag_appended() {
        let filter = FilterExpr::Simple(
            SimpleFilter::new(
                "event:page",
                FilterOperator::Contains,
                vec!["/Docs".to_string()],
            )
            .with_case_sensitive(false),
        );
        let value = serde_json::to_value(&filter).expect("json");
        assert_eq!(value, json!(["event:page", "contains", ["/Docs"], false]));
    }

    #[test]
    fn test_logical_and_negation_serialization() {
        let filter = FilterExpr::Or(vec![
            country_is("DE"),
            FilterExpr::Not(Box::new(page_is("/404"))),
        ]);
        let value = serde_json::to_value(&filter).expect("json");
        assert_eq!(
            value,
            json!([
                "or",
                [
                    ["visit:country", "is", ["DE"]],
                    ["not", ["event:page", "is", ["/404"]]]
                ]
            ])
        );
    }

    #[test]
    fn test_behavioral_serialization() {
        let filter = FilterExpr::Behavioral(BehavioralFilter {
            operator: BehavioralOperator::HasNotDone,
            inner: SimpleFilter::new("event:goal", FilterOperator::Is, vec!["Signup".into()]),
        });
        let value = serde_json::to_value(&filter).expect("json");
        assert_eq!(value, json!(["has_not_done", ["event:goal", "is", ["Signup"]]]));
    }

    #[test]
    fn test_segment_serialization() {
        let value = serde_json::to_value(FilterExpr::Segment(vec![7])).expect("json");
        assert_eq!(value, json!(["is", "segment", [7]]));
    }
}

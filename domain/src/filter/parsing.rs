//! Parsing wire-format filters into [`FilterExpr`] trees
//!
//! Accepted shapes, dispatched on array length and head element:
//!
//! | Shape | Example | Parses to |
//! |-------|---------|-----------|
//! | `["and", [..]]` / `["or", [..]]` | `["and", [f1, f2]]` | [`FilterExpr::And`] / [`FilterExpr::Or`] |
//! | `["not", f]` | `["not", ["event:page", "is", ["/x"]]]` | [`FilterExpr::Not`] |
//! | `[op, inner]` behavioral | `["has_done", ["event:goal", "is", ["Signup"]]]` | [`FilterExpr::Behavioral`] |
//! | `[dim, op, values, cs?]` | `["event:page", "is", ["/x"]]` | [`FilterExpr::Simple`] |
//! | `["is", "segment", [ids]]` | `["is", "segment", [5]]` | [`FilterExpr::Segment`] |
//!
//! Behavioral filters additionally accept two older operator-first payloads,
//! `[op, target]` and `[op, target, value]`, where the target is `"goal"` or
//! `"page"`. These normalize onto the canonical inner filter; the two-element
//! form leaves `values` empty, meaning "any goal" / "any page". Segment
//! filters are also tolerated with the keyword first (`["segment", "is", ..]`).
//!
//! Anything else is rejected with an [`invalid_filter`] error naming the
//! offending part.
//!
//! [`invalid_filter`]: ValidationError::invalid_filter

use serde_json::Value;

use super::expr::{BehavioralFilter, FilterExpr, SimpleFilter};
use super::operator::{BehavioralOperator, FilterOperator};
use crate::core::error::ValidationError;

/// Parse one wire-format filter.
pub fn parse_filter(value: &Value) -> Result<FilterExpr, ValidationError> {
    let items = value.as_array().ok_or_else(|| {
        ValidationError::invalid_filter(format!("Filter must be an array, got: {}", value))
    })?;

    match items.len() {
        2 => parse_wrapped(items),
        3 | 4 => parse_leaf(items),
        n => Err(ValidationError::invalid_filter(format!(
            "Filter array must have 2 to 4 elements, got {}",
            n
        ))),
    }
}

/// Parse a whole `filters` list, failing on the first bad entry.
pub fn parse_filters(values: &[Value]) -> Result<Vec<FilterExpr>, ValidationError> {
    values.iter().map(parse_filter).collect()
}

/// Two-element arrays: logical connectives and behavioral filters.
fn parse_wrapped(items: &[Value]) -> Result<FilterExpr, ValidationError> {
    let keyword = items[0].as_str().ok_or_else(|| {
        ValidationError::invalid_filter(format!(
            "Filter keyword must be a string, got: {}",
            items[0]
        ))
    })?;

    match keyword {
        "and" | "or" => {
            let children = items[1].as_array().ok_or_else(|| {
                ValidationError::invalid_filter(format!(
                    "'{}' expects an array of child filters",
                    keyword
                ))
            })?;
            if children.is_empty() {
                return Err(ValidationError::invalid_filter(format!(
                    "'{}' requires at least one child filter",
                    keyword
                )));
            }
            let children = parse_filters(children)?;
            Ok(match keyword {
                "and" => FilterExpr::And(children),
                _ => FilterExpr::Or(children),
            })
        }
        "not" => Ok(FilterExpr::Not(Box::new(parse_filter(&items[1])?))),
        "has_done" | "has_not_done" => {
            // The match arm guarantees the parse succeeds.
            let operator = keyword
                .parse::<BehavioralOperator>()
                .map_err(ValidationError::invalid_filter)?;
            let inner = parse_behavioral_inner(&items[1])?;
            Ok(FilterExpr::Behavioral(BehavioralFilter { operator, inner }))
        }
        other => Err(ValidationError::invalid_filter(format!(
            "Two-element filters must start with 'and', 'or', 'not', 'has_done' or 'has_not_done', got '{}'",
            other
        ))
        .with_details("Simple filters take the form [dimension, operator, values]")),
    }
}

/// Three- and four-element arrays: segment references and simple filters.
fn parse_leaf(items: &[Value]) -> Result<FilterExpr, ValidationError> {
    let mentions_segment = items[..2]
        .iter()
        .any(|item| item.as_str() == Some("segment"));
    if mentions_segment {
        return parse_segment(items);
    }
    parse_simple(items).map(FilterExpr::Simple)
}

fn parse_segment(items: &[Value]) -> Result<FilterExpr, ValidationError> {
    if items.len() != 3 {
        return Err(ValidationError::invalid_filter(
            "Segment filters must have exactly 3 elements: [\"is\", \"segment\", [ids]]",
        ));
    }

    // Canonical order is operator first; keyword-first input is normalized.
    let operator = if items[0].as_str() == Some("segment") {
        items[1].as_str()
    } else {
        items[0].as_str()
    };
    if operator != Some("is") {
        return Err(ValidationError::invalid_filter(format!(
            "Segment filters support only the 'is' operator, got: {}",
            operator.unwrap_or("<non-string>")
        )));
    }

    let ids = items[2].as_array().ok_or_else(|| {
        ValidationError::invalid_filter(format!(
            "Segment ids must be an array of integers, got: {}",
            items[2]
        ))
    })?;
    if ids.is_empty() {
        return Err(ValidationError::invalid_filter(
            "Segment filters require at least one segment id",
        ));
    }
    let ids = ids
        .iter()
        .map(|id| {
            id.as_i64().ok_or_else(|| {
                ValidationError::invalid_filter(format!(
                    "Segment ids must be integers, got: {}",
                    id
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FilterExpr::Segment(ids))
}

fn parse_simple(items: &[Value]) -> Result<SimpleFilter, ValidationError> {
    let dimension = items[0].as_str().ok_or_else(|| {
        ValidationError::invalid_filter(format!(
            "Filter dimension must be a string, got: {}",
            items[0]
        ))
    })?;
    let operator = parse_operator(&items[1])?;
    let values = parse_values(&items[2])?;
    if values.is_empty() {
        return Err(ValidationError::invalid_filter(format!(
            "Filter on '{}' requires at least one value",
            dimension
        )));
    }
    let case_sensitive = match items.get(3) {
        None => None,
        Some(Value::Bool(flag)) => Some(*flag),
        Some(other) => {
            return Err(ValidationError::invalid_filter(format!(
                "The case_sensitive flag must be a boolean, got: {}",
                other
            )));
        }
    };

    Ok(SimpleFilter {
        dimension: dimension.to_string(),
        operator,
        values,
        case_sensitive,
    })
}

/// The payload of a behavioral filter: a canonical simple filter, or one of
/// the operator-first shapes `[op, target]` / `[op, target, value]`.
fn parse_behavioral_inner(payload: &Value) -> Result<SimpleFilter, ValidationError> {
    let items = payload.as_array().ok_or_else(|| {
        ValidationError::invalid_filter(format!(
            "Behavioral filter payload must be an array, got: {}",
            payload
        ))
    })?;

    if let Some(head) = items.first().and_then(Value::as_str)
        && let Ok(operator) = head.parse::<FilterOperator>()
    {
        return parse_legacy_behavioral(operator, items);
    }

    if !(3..=4).contains(&items.len()) {
        return Err(ValidationError::invalid_filter(format!(
            "Behavioral filter payload must be [dimension, operator, values], got {} elements",
            items.len()
        )));
    }
    parse_simple(items)
}

/// Operator-first behavioral payloads. The target names an event dimension:
/// `"goal"` maps to `event:goal` and `"page"` to `event:page`. Without a
/// value the filter matches any goal or page.
fn parse_legacy_behavioral(
    operator: FilterOperator,
    items: &[Value],
) -> Result<SimpleFilter, ValidationError> {
    if !(2..=3).contains(&items.len()) {
        return Err(ValidationError::invalid_filter(format!(
            "Operator-first behavioral payloads must be [operator, target] or \
             [operator, target, value], got {} elements",
            items.len()
        )));
    }

    let target = items[1].as_str().ok_or_else(|| {
        ValidationError::invalid_filter(format!(
            "Behavioral target must be a string, got: {}",
            items[1]
        ))
    })?;
    let dimension = match target {
        "goal" | "event:goal" => "event:goal",
        "page" | "event:page" => "event:page",
        other => {
            return Err(ValidationError::invalid_filter(format!(
                "Behavioral target must be 'goal' or 'page', got '{}'",
                other
            )));
        }
    };

    let values = match items.get(2) {
        None => Vec::new(),
        Some(Value::String(value)) => vec![value.clone()],
        Some(value @ Value::Array(_)) => parse_values(value)?,
        Some(other) => {
            return Err(ValidationError::invalid_filter(format!(
                "Behavioral target value must be a string or array of strings, got: {}",
                other
            )));
        }
    };

    Ok(SimpleFilter {
        dimension: dimension.to_string(),
        operator,
        values,
        case_sensitive: None,
    })
}

fn parse_operator(value: &Value) -> Result<FilterOperator, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| {
            ValidationError::invalid_filter(format!(
                "Filter operator must be a string, got: {}",
                value
            ))
        })?
        .parse::<FilterOperator>()
        .map_err(|message| {
            ValidationError::invalid_filter(message).with_details(format!(
                "Valid operators: {}",
                FilterOperator::ALL
                    .iter()
                    .map(|op| op.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
}

fn parse_values(value: &Value) -> Result<Vec<String>, ValidationError> {
    let items = value.as_array().ok_or_else(|| {
        ValidationError::invalid_filter(format!(
            "Filter values must be an array of strings, got: {}",
            value
        ))
    })?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ValidationError::invalid_filter(format!(
                    "Filter values must be strings, got: {}",
                    item
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ValidationErrorKind;
    use serde_json::json;

    fn parse(value: Value) -> Result<FilterExpr, ValidationError> {
        parse_filter(&value)
    }

    fn parse_ok(value: Value) -> FilterExpr {
        parse(value).expect("filter should parse")
    }

    fn parse_err(value: Value) -> ValidationError {
        parse(value).expect_err("filter should be rejected")
    }

    // ==================== Simple Filters ====================

    #[test]
    fn test_simple_filter_parses() {
        let filter = parse_ok(json!(["event:page", "is", ["/pricing", "/docs"]]));
        match filter {
            FilterExpr::Simple(simple) => {
                assert_eq!(simple.dimension, "event:page");
                assert_eq!(simple.operator, FilterOperator::Is);
                assert_eq!(simple.values, vec!["/pricing", "/docs"]);
                assert_eq!(simple.case_sensitive, None);
            }
            other => panic!("expected simple filter, got {:?}", other),
        }
    }

    #[test]
    fn test_case_sensitive_flag_parses() {
        let filter = parse_ok(json!(["event:page", "contains", ["/Docs"], false]));
        match filter {
            FilterExpr::Simple(simple) => assert_eq!(simple.case_sensitive, Some(false)),
            other => panic!("expected simple filter, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_values_rejected() {
        let err = parse_err(json!(["event:page", "is", []]));
        assert_eq!(err.kind, ValidationErrorKind::InvalidFilter);
        assert!(err.message.contains("event:page"));
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let err = parse_err(json!(["event:page", "equals", ["/x"]]));
        assert!(err.message.contains("equals"));
        assert!(err.details.is_some());
    }

    #[test]
    fn test_non_string_values_rejected() {
        let err = parse_err(json!(["event:page", "is", ["/x", 42]]));
        assert!(err.message.contains("42"));
    }

    #[test]
    fn test_non_boolean_case_flag_rejected() {
        let err = parse_err(json!(["event:page", "is", ["/x"], "yes"]));
        assert!(err.message.contains("case_sensitive"));
    }

    // ==================== Logical Connectives ====================

    #[test]
    fn test_and_or_parse_recursively() {
        let filter = parse_ok(json!([
            "and",
            [
                ["visit:country", "is", ["DE"]],
                ["or", [["event:page", "is", ["/a"]], ["event:page", "is", ["/b"]]]]
            ]
        ]));
        match filter {
            FilterExpr::And(children) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[1], FilterExpr::Or(_)));
            }
            other => panic!("expected 'and' filter, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_logical_children_rejected() {
        let err = parse_err(json!(["and", []]));
        assert!(err.message.contains("at least one child"));
        assert!(parse(json!(["or", []])).is_err());
    }

    #[test]
    fn test_not_wraps_single_child() {
        let filter = parse_ok(json!(["not", ["event:page", "is", ["/404"]]]));
        match filter {
            FilterExpr::Not(child) => assert!(child.references_dimension("event:page")),
            other => panic!("expected 'not' filter, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_child_fails_whole_parse() {
        let err = parse_err(json!(["and", [["event:page", "is", ["/x"]], ["nope"]]]));
        assert_eq!(err.kind, ValidationErrorKind::InvalidFilter);
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        let err = parse_err(json!(["event:page", "is"]));
        assert!(err.message.contains("event:page"));
        assert!(err.details.is_some());
    }

    // ==================== Behavioral Filters ====================

    #[test]
    fn test_behavioral_with_canonical_inner() {
        let filter = parse_ok(json!(["has_done", ["event:goal", "is", ["Signup"]]]));
        match filter {
            FilterExpr::Behavioral(behavioral) => {
                assert_eq!(behavioral.operator, BehavioralOperator::HasDone);
                assert_eq!(behavioral.inner.dimension, "event:goal");
                assert_eq!(behavioral.inner.values, vec!["Signup"]);
            }
            other => panic!("expected behavioral filter, got {:?}", other),
        }
    }

    #[test]
    fn test_behavioral_two_element_payload_means_any() {
        let filter = parse_ok(json!(["has_not_done", ["is", "goal"]]));
        match filter {
            FilterExpr::Behavioral(behavioral) => {
                assert_eq!(behavioral.operator, BehavioralOperator::HasNotDone);
                assert_eq!(behavioral.inner.dimension, "event:goal");
                assert!(behavioral.inner.values.is_empty());
            }
            other => panic!("expected behavioral filter, got {:?}", other),
        }
    }

    #[test]
    fn test_behavioral_three_element_payload_with_scalar_value() {
        let filter = parse_ok(json!(["has_done", ["is", "page", "/welcome"]]));
        match filter {
            FilterExpr::Behavioral(behavioral) => {
                assert_eq!(behavioral.inner.dimension, "event:page");
                assert_eq!(behavioral.inner.values, vec!["/welcome"]);
            }
            other => panic!("expected behavioral filter, got {:?}", other),
        }
    }

    #[test]
    fn test_behavioral_three_element_payload_with_array_value() {
        let filter = parse_ok(json!(["has_done", ["is", "goal", ["Signup", "Purchase"]]]));
        match filter {
            FilterExpr::Behavioral(behavioral) => {
                assert_eq!(behavioral.inner.values, vec!["Signup", "Purchase"]);
            }
            other => panic!("expected behavioral filter, got {:?}", other),
        }
    }

    #[test]
    fn test_behavioral_unknown_target_rejected() {
        let err = parse_err(json!(["has_done", ["is", "country"]]));
        assert!(err.message.contains("country"));
    }

    #[test]
    fn test_behavioral_inner_empty_values_rejected() {
        // Canonical inner filters still require values; only the
        // operator-first shapes may omit them.
        let err = parse_err(json!(["has_done", ["event:goal", "is", []]]));
        assert!(err.message.contains("event:goal"));
    }

    // ==================== Segment Filters ====================

    #[test]
    fn test_segment_parses_operator_first() {
        let filter = parse_ok(json!(["is", "segment", [12, 34]]));
        assert_eq!(filter, FilterExpr::Segment(vec![12, 34]));
    }

    #[test]
    fn test_segment_parses_keyword_first() {
        let filter = parse_ok(json!(["segment", "is", [5]]));
        assert_eq!(filter, FilterExpr::Segment(vec![5]));
    }

    #[test]
    fn test_segment_rejects_other_operators() {
        let err = parse_err(json!(["is_not", "segment", [5]]));
        assert!(err.message.contains("is_not"));
    }

    #[test]
    fn test_segment_rejects_empty_or_non_integer_ids() {
        assert!(parse(json!(["is", "segment", []])).is_err());
        assert!(parse(json!(["is", "segment", ["five"]])).is_err());
    }

    // ==================== Shape Errors ====================

    #[test]
    fn test_non_array_filter_rejected() {
        let err = parse_err(json!("event:page"));
        assert!(err.message.contains("array"));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        assert!(parse(json!(["event:page"])).is_err());
        assert!(parse(json!(["event:page", "is", ["/x"], true, "extra"])).is_err());
    }

    #[test]
    fn test_filter_list_fails_on_first_bad_entry() {
        let values = vec![
            json!(["event:page", "is", ["/a"]]),
            json!(["event:page", "bogus", ["/b"]]),
            json!(["event:page", "is", ["/c"]]),
        ];
        let err = parse_filters(&values).expect_err("second filter is invalid");
        assert!(err.message.contains("bogus"));
    }
}

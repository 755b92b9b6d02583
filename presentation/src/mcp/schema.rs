//! Input schema for the query tool.
//!
//! The schema is generated from the domain vocabularies ([`Metric::ALL`],
//! [`Period::ALL`], [`FilterOperator::ALL`]) so the advertised enums can
//! never drift from what validation accepts.

use plausible_domain::{FilterOperator, Metric, Period};
use serde_json::{json, Value};

/// JSON Schema describing the arguments of the query tool.
pub fn query_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "site_id": {
                "type": "string",
                "description": "The site domain as configured in Plausible, e.g. 'example.com'"
            },
            "metrics": {
                "type": "array",
                "items": { "type": "string", "enum": metric_names() },
                "minItems": 1,
                "description": "Metrics to compute. Session metrics (bounce_rate, views_per_visit, \
                                visit_duration) cannot be combined with event: or time dimensions. \
                                scroll_depth and time_on_page require event:page; conversion and \
                                revenue metrics require event:goal (as dimension or filter)."
            },
            "date_range": {
                "description": "Reporting window: a named shorthand, or [start, end] as ISO-8601 \
                                dates with start strictly before end",
                "oneOf": [
                    { "type": "string", "enum": period_names() },
                    {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 2,
                        "maxItems": 2
                    }
                ]
            },
            "dimensions": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Properties to group by: event:name, event:page, event:hostname, \
                                event:goal, visit:* (source, country, device, ...), time or \
                                time:minute|hour|day|week|month, or event:props:<name> for \
                                custom properties"
            },
            "filters": {
                "type": "array",
                "items": { "type": "array" },
                "description": format!(
                    "Filter expressions. Simple: [dimension, operator, values] with operator one \
                     of {}; optional boolean case_sensitive as 4th element. Logical: \
                     [\"and\"|\"or\", [filters]] and [\"not\", filter]. Behavioral: \
                     [\"has_done\"|\"has_not_done\", filter]. Segments: [\"is\", \"segment\", [ids]].",
                    operator_names().join(", ")
                )
            },
            "order_by": {
                "type": "array",
                "items": {
                    "type": "array",
                    "prefixItems": [
                        { "type": "string" },
                        { "type": "string", "enum": ["asc", "desc"] }
                    ],
                    "minItems": 2,
                    "maxItems": 2
                },
                "description": "Sort order as [field, direction] pairs; fields are requested \
                                metrics or dimensions"
            },
            "include": {
                "type": "object",
                "properties": {
                    "imports": { "type": "boolean" },
                    "time_labels": {
                        "type": "boolean",
                        "description": "Requires a time dimension"
                    },
                    "total_rows": { "type": "boolean" }
                }
            },
            "pagination": {
                "type": "object",
                "properties": {
                    "limit": { "type": "integer", "minimum": 0 },
                    "offset": { "type": "integer", "minimum": 0 }
                }
            }
        },
        "required": ["site_id", "metrics", "date_range"]
    })
}

fn metric_names() -> Vec<&'static str> {
    Metric::ALL.iter().map(|m| m.as_str()).collect()
}

fn period_names() -> Vec<&'static str> {
    Period::ALL.iter().map(|p| p.as_str()).collect()
}

fn operator_names() -> Vec<&'static str> {
    FilterOperator::ALL.iter().map(|op| op.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_every_metric() {
        let schema = query_input_schema();
        let listed = schema["properties"]["metrics"]["items"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(listed.len(), Metric::ALL.len());
        for metric in Metric::ALL {
            assert!(
                listed.iter().any(|v| v == metric.as_str()),
                "schema is missing metric '{}'",
                metric
            );
        }
    }

    #[test]
    fn schema_lists_every_date_shorthand() {
        let schema = query_input_schema();
        let listed = schema["properties"]["date_range"]["oneOf"][0]["enum"]
            .as_array()
            .unwrap();
        for period in Period::ALL {
            assert!(
                listed.iter().any(|v| v == period.as_str()),
                "schema is missing shorthand '{}'",
                period
            );
        }
    }

    #[test]
    fn schema_requires_the_three_mandatory_fields() {
        let schema = query_input_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        for field in ["site_id", "metrics", "date_range"] {
            assert!(required.iter().any(|v| v == field));
        }
    }

    #[test]
    fn filter_description_names_all_operators() {
        let schema = query_input_schema();
        let description = schema["properties"]["filters"]["description"]
            .as_str()
            .unwrap();
        for op in FilterOperator::ALL {
            assert!(description.contains(op.as_str()));
        }
    }
}

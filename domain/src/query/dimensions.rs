//! Dimension identifiers and their classification
//!
//! Dimensions are grouped by prefix:
//!
//! | Prefix | Scope | Examples |
//! |--------|-------|----------|
//! | `event:` | Single event | `event:page`, `event:goal` |
//! | `event:props:` | Custom event property | `event:props:plan` |
//! | `visit:` | Whole session | `visit:source`, `visit:country` |
//! | `time` / `time:` | Time bucket | `time`, `time:day`, `time:hour` |
//!
//! Custom properties are open-ended, so `event:props:<name>` is accepted for
//! any non-empty `<name>`. Everything else must match the known set exactly.

/// Event-scoped dimensions.
pub const EVENT_DIMENSIONS: [&str; 4] =
    ["event:name", "event:page", "event:hostname", "event:goal"];

/// Session-scoped dimensions.
pub const VISIT_DIMENSIONS: [&str; 21] = [
    "visit:entry_page",
    "visit:exit_page",
    "visit:source",
    "visit:referrer",
    "visit:channel",
    "visit:utm_medium",
    "visit:utm_source",
    "visit:utm_campaign",
    "visit:utm_content",
    "visit:utm_term",
    "visit:device",
    "visit:browser",
    "visit:browser_version",
    "visit:os",
    "visit:os_version",
    "visit:country",
    "visit:region",
    "visit:city",
    "visit:country_name",
    "visit:region_name",
    "visit:city_name",
];

/// Time dimensions. Bare `time` picks a bucket size automatically.
pub const TIME_DIMENSIONS: [&str; 6] =
    ["time", "time:minute", "time:hour", "time:day", "time:week", "time:month"];

/// Prefix for custom event properties.
pub const CUSTOM_PROPERTY_PREFIX: &str = "event:props:";

/// True for `event:props:<name>` with a non-empty property name.
pub fn is_custom_property(dimension: &str) -> bool {
    dimension
        .strip_prefix(CUSTOM_PROPERTY_PREFIX)
        .is_some_and(|name| !name.is_empty())
}

/// True when the identifier is a valid dimension of any group.
pub fn is_known_dimension(dimension: &str) -> bool {
    EVENT_DIMENSIONS.contains(&dimension)
        || VISIT_DIMENSIONS.contains(&dimension)
        || TIME_DIMENSIONS.contains(&dimension)
        || is_custom_property(dimension)
}

/// True for dimensions that break results down per event (including custom
/// properties). These conflict with session metrics.
pub fn is_event_scoped(dimension: &str) -> bool {
    dimension.starts_with("event:")
}

/// True for `time` and every `time:*` bucket. These also conflict with
/// session metrics, and one of them must be present for time labels.
pub fn is_time_scoped(dimension: &str) -> bool {
    dimension == "time" || dimension.starts_with("time:")
}

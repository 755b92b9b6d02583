//! Filter operators

use serde::{Deserialize, Serialize};

/// Comparison operator of a simple filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Is,
    IsNot,
    Contains,
    ContainsNot,
    Matches,
    MatchesNot,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 6] = [
        FilterOperator::Is,
        FilterOperator::IsNot,
        FilterOperator::Contains,
        FilterOperator::ContainsNot,
        FilterOperator::Matches,
        FilterOperator::MatchesNot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Is => "is",
            FilterOperator::IsNot => "is_not",
            FilterOperator::Contains => "contains",
            FilterOperator::ContainsNot => "contains_not",
            FilterOperator::Matches => "matches",
            FilterOperator::MatchesNot => "matches_not",
        }
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperator::ALL
            .iter()
            .find(|op| op.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown filter operator: '{}'", s))
    }
}

/// Operator of a behavioral filter, matching visitors by whether they
/// performed some event during the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehavioralOperator {
    HasDone,
    HasNotDone,
}

impl BehavioralOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehavioralOperator::HasDone => "has_done",
            BehavioralOperator::HasNotDone => "has_not_done",
        }
    }
}

impl std::fmt::Display for BehavioralOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BehavioralOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "has_done" => Ok(BehavioralOperator::HasDone),
            "has_not_done" => Ok(BehavioralOperator::HasNotDone),
            other => Err(format!("Unknown behavioral operator: '{}'", other)),
        }
    }
}

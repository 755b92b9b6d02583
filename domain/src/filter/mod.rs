//! Filter expression engine
//!
//! Wire-format filters are parsed once at the validation boundary into a
//! typed [`expr::FilterExpr`] tree; everything downstream (dimension search,
//! serialization back to the API) works on the tree, never on raw JSON.
//!
//! - [`expr`] — the expression tree and dimension search
//! - [`operator`] — comparison and behavioral operators
//! - [`parsing`] — wire format to tree conversion

pub mod expr;
pub mod operator;
pub mod parsing;

pub use expr::{any_references, BehavioralFilter, FilterExpr, SimpleFilter};
pub use operator::{BehavioralOperator, FilterOperator};
pub use parsing::{parse_filter, parse_filters};

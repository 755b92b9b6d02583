//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ValidationError`] — why a query was rejected, and in which category

pub mod error;

//! Per-search-type clause builders.
//!
//! Each builder reads the request and validates its own fields. It produces
//! a single clause with `build_clause`, and `append` pushes that clause to
//! the filter bucket.

pub mod attribute;
pub mod geo;
pub mod text;

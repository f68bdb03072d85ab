//! Merges clause buckets into one bool query.

use crate::dsl::{BoolQuery, Query};

use super::filter_type::{ClauseBuckets, FilterType};

/// Attaches every non-empty bucket to the matching bool slot.
///
/// Empty buckets are omitted rather than attached as empty lists.
pub fn assemble(mut buckets: ClauseBuckets) -> Query {
    let mut bool_query = BoolQuery::new();
    for filter_type in FilterType::ALL {
        let clauses = buckets.take(filter_type);
        match filter_type {
            FilterType::Filter => bool_query.filter = clauses,
            FilterType::Must => bool_query.must = clauses,
            FilterType::MustNot => bool_query.must_not = clauses,
            FilterType::Should => bool_query.should = clauses,
        }
    }
    bool_query.into_query()
}

//! Bool-query clause buckets.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::dsl::Query;

/// The bool-query slot a clause is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterType {
    /// Must match; does not contribute to scoring.
    Filter,
    /// Must match; contributes to scoring.
    Must,
    /// Must not match.
    MustNot,
    /// Should match.
    Should,
}

impl FilterType {
    /// Every bucket, in assembly order.
    pub const ALL: [FilterType; 4] = [
        FilterType::Filter,
        FilterType::Must,
        FilterType::MustNot,
        FilterType::Should,
    ];

    /// The engine's name for the slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Filter => "filter",
            FilterType::Must => "must",
            FilterType::MustNot => "must_not",
            FilterType::Should => "should",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "filter" => Ok(FilterType::Filter),
            "must" => Ok(FilterType::Must),
            "must_not" | "mustnot" => Ok(FilterType::MustNot),
            "should" => Ok(FilterType::Should),
            _ => Err(format!("unknown filter type: {}", s)),
        }
    }
}

/// Clauses collected during one compilation, keyed by bucket.
///
/// Clauses keep insertion order within a bucket and never move between
/// buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseBuckets {
    buckets: BTreeMap<FilterType, Vec<Query>>,
}

impl ClauseBuckets {
    /// Creates an empty bucket map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a clause to a bucket.
    pub fn push(&mut self, filter_type: FilterType, clause: Query) {
        self.buckets.entry(filter_type).or_default().push(clause);
    }

    /// The clauses in a bucket.
    pub fn get(&self, filter_type: FilterType) -> &[Query] {
        self.buckets
            .get(&filter_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total clause count across buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns true when no clause has been added.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns the clauses of a bucket.
    pub fn take(&mut self, filter_type: FilterType) -> Vec<Query> {
        self.buckets.remove(&filter_type).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("FILTER".parse::<FilterType>(), Ok(FilterType::Filter));
        assert_eq!("must_not".parse::<FilterType>(), Ok(FilterType::MustNot));
        assert!("maybe".parse::<FilterType>().is_err());
    }

    #[test]
    fn test_buckets_keep_order() {
        let mut buckets = ClauseBuckets::new();
        buckets.push(FilterType::Filter, Query::term("a", "1"));
        buckets.push(FilterType::Filter, Query::term("b", "2"));
        buckets.push(FilterType::Should, Query::term("c", "3"));

        assert_eq!(
            buckets.get(FilterType::Filter),
            &[Query::term("a", "1"), Query::term("b", "2")]
        );
        assert!(buckets.get(FilterType::Must).is_empty());
        assert_eq!(buckets.len(), 3);

        let should = buckets.take(FilterType::Should);
        assert_eq!(should.len(), 1);
        assert_eq!(buckets.len(), 2);
    }
}

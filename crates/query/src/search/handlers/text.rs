//! Free-text search clause builder.

use crate::dsl::Query;
use crate::error::{ErrorKind, QueryError, QueryResult};
use crate::search::filter_type::{ClauseBuckets, FilterType};
use crate::types::SearchRequest;

/// Builds the text clause and appends it to the filter bucket.
pub fn append(request: &SearchRequest, buckets: &mut ClauseBuckets) -> QueryResult<()> {
    let clause = build_clause(request)?;
    buckets.push(FilterType::Filter, clause);
    Ok(())
}

/// Builds a query-string clause from `q`.
///
/// `*` is passed through as a wildcard operator; the character class of `q`
/// is restricted before it reaches this builder.
pub fn build_clause(request: &SearchRequest) -> QueryResult<Query> {
    tracing::debug!("text search block");

    match request.q.as_deref() {
        Some(q) if !q.trim().is_empty() => Ok(Query::query_string(q)),
        _ => Err(QueryError::new(
            ErrorKind::BadTextQuery,
            "bad text query values",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_request(q: Option<&str>) -> SearchRequest {
        SearchRequest {
            search_type: Some("textSearch_".to_string()),
            q: q.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_text() {
        let clause = build_clause(&text_request(Some("aqm sensor"))).unwrap();
        assert_eq!(
            clause.to_json(),
            json!({ "query_string": { "query": "aqm sensor" } })
        );
    }

    #[test]
    fn test_wildcard_text() {
        let clause = build_clause(&text_request(Some("pune*"))).unwrap();
        assert_eq!(
            clause.to_json(),
            json!({ "query_string": { "query": "pune*", "analyze_wildcard": true } })
        );
    }

    #[test]
    fn test_blank_text_rejected() {
        for q in [None, Some(""), Some("   ")] {
            let err = build_clause(&text_request(q)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadTextQuery);
        }
    }
}

//! Typed search-engine query model.
//!
//! Mirrors the subset of the Elasticsearch Query DSL the catalogue emits:
//! term, match, query-string, bool, geo-shape and match-all queries, plus
//! terms aggregations. Every node renders to engine JSON via `to_json` and
//! serializes to the same JSON through serde.

mod aggregation;
mod query;
mod shape;

pub use aggregation::Aggregation;
pub use query::{BoolQuery, GeoShapeQuery, MatchQuery, Query, QueryStringQuery, TermQuery};
pub use shape::{Position, Shape, SpatialRelation};

/// Suffix of the exact-match sub-field of an analyzed text field.
pub const KEYWORD_SUFFIX: &str = ".keyword";

/// Exact-match field of the item id.
pub const ID_KEYWORD: &str = "id.keyword";

/// Exact-match field of the item type.
pub const TYPE_KEYWORD: &str = "type.keyword";

/// Exact-match field of the item tags.
pub const TAGS_KEYWORD: &str = "tags.keyword";

/// Returns the exact-match sub-field for `field`.
pub fn keyword_field(field: &str) -> String {
    if field.ends_with(KEYWORD_SUFFIX) {
        field.to_string()
    } else {
        format!("{}{}", field, KEYWORD_SUFFIX)
    }
}

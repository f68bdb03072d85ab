//! Listing queries.
//!
//! A listing enumerates distinct values (tags, or item ids of one type)
//! through a terms aggregation instead of returning documents. Terms
//! aggregations have no offset, so the bucket count is `limit - offset` and
//! callers slice the buckets themselves.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};

use crate::config::QueryConfig;
use crate::dsl::{Aggregation, BoolQuery, ID_KEYWORD, Query, TAGS_KEYWORD};
use crate::error::{ErrorKind, QueryError, QueryResult};

/// Item type value that lists tags rather than items.
pub const TAGS_ITEM_TYPE: &str = "tags";

/// Name of the listing aggregation in the request body.
pub const LISTING_AGGREGATION: &str = "results";

/// A listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequest {
    /// What to list: `tags` or an item category.
    pub item_type: String,
    /// Document type to list; required unless listing tags.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_filter: Option<String>,
    /// Tenancy scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Page start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl ListingRequest {
    /// Decodes a request from its JSON wire form.
    pub fn from_json(value: Value) -> QueryResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| QueryError::invalid_param_value(format!("invalid listing request: {}", e)))
    }
}

/// The base query and aggregation of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    /// Documents the aggregation runs over.
    pub query: Query,
    /// The terms aggregation.
    pub aggregation: Aggregation,
}

impl ListingQuery {
    /// Renders the request body: hits are suppressed, only buckets are
    /// returned.
    pub fn body(&self) -> Value {
        json!({
            "query": self.query.to_json(),
            "aggs": { LISTING_AGGREGATION: self.aggregation.to_json() },
            "size": 0
        })
    }
}

impl Serialize for ListingQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body().serialize(serializer)
    }
}

/// Builds the listing query for a request.
pub fn build_listing(request: &ListingRequest, config: &QueryConfig) -> QueryResult<ListingQuery> {
    let instance = request.instance.as_deref().filter(|s| !s.is_empty());
    let instance_clause =
        instance.map(|instance| Query::term(config.listing_instance_field.as_str(), instance));

    let (query, field) = if request.item_type.eq_ignore_ascii_case(TAGS_ITEM_TYPE) {
        let query = match instance_clause {
            Some(clause) => BoolQuery::new().filter(clause).into_query(),
            None => Query::MatchAll,
        };
        (query, TAGS_KEYWORD)
    } else {
        let type_filter = request
            .type_filter
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                QueryError::new(
                    ErrorKind::InvalidParamValue,
                    format!("missing type for {} listing", request.item_type),
                )
            })?;
        let mut query = BoolQuery::new().filter(Query::match_query("type", type_filter));
        if let Some(clause) = instance_clause {
            query = query.filter(clause);
        }
        (query.into_query(), ID_KEYWORD)
    };

    let size = aggregation_size(request.limit, request.offset, config);
    tracing::debug!(item_type = %request.item_type, size, "listing query");

    Ok(ListingQuery {
        query,
        aggregation: Aggregation::terms(field, size),
    })
}

/// Bucket count for a page: `limit - offset`, never negative.
pub fn aggregation_size(limit: Option<u32>, offset: Option<u32>, config: &QueryConfig) -> u32 {
    limit
        .unwrap_or(config.pagination_size)
        .saturating_sub(offset.unwrap_or(config.pagination_from))
}

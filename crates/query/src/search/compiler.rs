//! Search query compiler.
//!
//! Classifies a [`SearchRequest`] by its search-type marker, runs every
//! matching clause builder against one bucket map, scopes the result to the
//! request's tenancy, and assembles the bool query.
//!
//! # Example
//!
//! ```
//! use catalogue_query::{QueryCompiler, QueryConfig, SearchRequest};
//! use serde_json::json;
//!
//! let compiler = QueryCompiler::new(QueryConfig::default());
//! let request = SearchRequest::from_json(json!({
//!     "searchType": "textSearch_",
//!     "q": "aqm*",
//!     "instance": "pune"
//! }))
//! .unwrap();
//!
//! let query = compiler.compile(&request).unwrap();
//! assert_eq!(query.as_bool().unwrap().filter.len(), 2);
//! ```

use std::sync::LazyLock;

use regex::RegexSet;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::config::QueryConfig;
use crate::dsl::{ID_KEYWORD, Query};
use crate::error::{ErrorKind, QueryError, QueryResult};
use crate::types::SearchRequest;

use super::assembler::assemble;
use super::filter_type::{ClauseBuckets, FilterType};
use super::handlers::{attribute, geo, text};

/// Marker that short-circuits into a lookup of the item by id.
pub const PARENT_OBJECT_MARKER: &str = "getParentObjectInfo";

/// A search type recognized in the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// `geoSearch`
    Geo,
    /// `textSearch`
    Text,
    /// `attributeSearch`
    Attribute,
    /// `tagsSearch`
    Tags,
    /// `responseFilter`
    ResponseFilter,
}

const CLASSIFIERS: [(SearchKind, &str); 5] = [
    (SearchKind::Geo, "geoSearch"),
    (SearchKind::Text, "textSearch"),
    (SearchKind::Attribute, "attributeSearch"),
    (SearchKind::Tags, "tagsSearch"),
    (SearchKind::ResponseFilter, "responseFilter"),
];

static CLASSIFIER_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(CLASSIFIERS.iter().map(|(_, pattern)| *pattern))
        .expect("classifier patterns are valid")
});

impl SearchKind {
    /// Returns every search kind whose pattern occurs in `marker`.
    pub fn classify(marker: &str) -> Vec<SearchKind> {
        CLASSIFIER_SET
            .matches(marker)
            .into_iter()
            .map(|index| CLASSIFIERS[index].0)
            .collect()
    }

    /// Returns true when the request carries the field this kind is built
    /// from. A marker none of whose kinds are anchored is invalid syntax.
    pub fn is_anchored(&self, request: &SearchRequest) -> bool {
        match self {
            SearchKind::Geo => request.geometry.is_some(),
            SearchKind::Text => request.q.is_some(),
            SearchKind::Attribute => request.property.is_some() || request.value.is_some(),
            SearchKind::Tags => request.value.is_some(),
            SearchKind::ResponseFilter => true,
        }
    }
}

/// A complete search request body.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBody {
    /// The compiled query.
    pub query: Query,
    /// Page size.
    pub size: Option<u32>,
    /// Page start.
    pub from: Option<u32>,
    /// Fields returned per hit.
    pub source: Option<Vec<String>>,
}

impl SearchBody {
    /// Renders the body as engine JSON.
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("query".to_string(), self.query.to_json());
        if let Some(size) = self.size {
            body.insert("size".to_string(), json!(size));
        }
        if let Some(from) = self.from {
            body.insert("from".to_string(), json!(from));
        }
        if let Some(ref source) = self.source {
            body.insert("_source".to_string(), json!(source));
        }
        Value::Object(body)
    }
}

impl Serialize for SearchBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Compiles search requests into engine queries.
#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    config: QueryConfig,
}

struct Compiled {
    query: Query,
    response_filter: bool,
}

impl QueryCompiler {
    /// Creates a compiler.
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Compiles a search request into a query.
    pub fn compile(&self, request: &SearchRequest) -> QueryResult<Query> {
        self.build(request).map(|compiled| compiled.query)
    }

    /// Compiles a search request into a full request body with paging and
    /// source filtering.
    pub fn compile_body(&self, request: &SearchRequest) -> QueryResult<SearchBody> {
        let compiled = self.build(request)?;

        let size = request.limit.or_else(|| {
            request
                .search_allowed()
                .then_some(self.config.default_search_size)
        });
        let source = if compiled.response_filter {
            request.response_fields().map(<[String]>::to_vec)
        } else {
            None
        };

        Ok(SearchBody {
            query: compiled.query,
            size,
            from: request.offset,
            source,
        })
    }

    fn build(&self, request: &SearchRequest) -> QueryResult<Compiled> {
        let result = self.build_inner(request);
        match &result {
            Ok(compiled) => {
                tracing::debug!(query = %compiled.query.to_json(), "compiled search query");
            }
            Err(e) => {
                tracing::warn!(urn = e.kind().urn(), detail = e.detail(), "rejected search request");
            }
        }
        result
    }

    fn build_inner(&self, request: &SearchRequest) -> QueryResult<Compiled> {
        let marker = request
            .search_type
            .as_deref()
            .ok_or_else(|| QueryError::invalid_syntax("Invalid Syntax"))?;

        if marker.contains(PARENT_OBJECT_MARKER) {
            return parent_object_lookup(request).map(|query| Compiled {
                query,
                response_filter: false,
            });
        }

        let kinds = SearchKind::classify(marker);
        tracing::debug!(marker, ?kinds, "classified search request");

        if !kinds.iter().any(|kind| kind.is_anchored(request)) {
            return Err(QueryError::invalid_syntax("Invalid Syntax"));
        }

        let mut buckets = ClauseBuckets::new();

        if kinds.contains(&SearchKind::Geo) {
            geo::append(request, &mut buckets)?;
        }

        if kinds.contains(&SearchKind::Text) {
            text::append(request, &mut buckets)?;
        }

        let tags = kinds.contains(&SearchKind::Tags);
        if tags || kinds.contains(&SearchKind::Attribute) {
            let default_property = tags.then_some(attribute::TAGS_PROPERTY);
            attribute::append(request, default_property, &mut buckets)?;
        }

        let response_filter = kinds.contains(&SearchKind::ResponseFilter);
        if response_filter {
            tracing::debug!("response filter block");
            if !request.search_allowed() {
                return Err(QueryError::new(
                    ErrorKind::OperationNotAllowed,
                    "operation not allowed",
                ));
            }
            if request.response_fields().is_none() {
                return Err(QueryError::new(ErrorKind::BadFilter, "bad filters applied"));
            }
        }

        if let Some(instance) = request.instance() {
            buckets.push(
                FilterType::Filter,
                Query::term(self.config.instance_field.as_str(), instance),
            );
        }

        Ok(Compiled {
            query: assemble(buckets),
            response_filter,
        })
    }
}

fn parent_object_lookup(request: &SearchRequest) -> QueryResult<Query> {
    let id = request
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| QueryError::invalid_param_value("missing id"))?;
    Ok(Query::term(ID_KEYWORD, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compiler() -> QueryCompiler {
        QueryCompiler::new(QueryConfig::default())
    }

    fn request(value: Value) -> SearchRequest {
        SearchRequest::from_json(value).unwrap()
    }

    #[test]
    fn test_classify_combined_marker() {
        assert_eq!(
            SearchKind::classify("geoSearch_textSearch_responseFilter_"),
            vec![SearchKind::Geo, SearchKind::Text, SearchKind::ResponseFilter]
        );
        assert!(SearchKind::classify("browse").is_empty());
    }

    #[test]
    fn test_missing_marker_is_invalid_syntax() {
        let err = compiler().compile(&request(json!({ "q": "x" }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSyntax);
    }

    #[test]
    fn test_parent_object_lookup() {
        let query = compiler()
            .compile(&request(json!({ "searchType": "getParentObjectInfo", "id": "rg-1" })))
            .unwrap();
        assert_eq!(query.to_json(), json!({ "term": { "id.keyword": "rg-1" } }));
        assert_eq!(query.as_term().unwrap().value, "rg-1");

        let err = compiler()
            .compile(&request(json!({ "searchType": "getParentObjectInfo" })))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParamValue);
    }

    #[test]
    fn test_instance_goes_to_filter() {
        let query = compiler()
            .compile(&request(json!({
                "searchType": "textSearch_",
                "q": "aqm",
                "instance": "pune"
            })))
            .unwrap();
        let bool_query = query.as_bool().unwrap();
        assert_eq!(bool_query.filter[1], Query::term("instance", "pune"));
        assert!(bool_query.must.is_empty());
        assert!(bool_query.should.is_empty());
    }

    #[test]
    fn test_custom_instance_field() {
        let config = QueryConfig {
            instance_field: "tenant".to_string(),
            ..Default::default()
        };
        let query = QueryCompiler::new(config)
            .compile(&request(json!({
                "searchType": "textSearch_",
                "q": "aqm",
                "instance": "pune"
            })))
            .unwrap();
        assert!(query.to_json().to_string().contains("\"tenant\""));
    }

    #[test]
    fn test_response_filter_gating() {
        let err = compiler()
            .compile(&request(json!({
                "searchType": "responseFilter_",
                "attribute": ["id"]
            })))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OperationNotAllowed);

        let err = compiler()
            .compile(&request(json!({ "searchType": "responseFilter_", "search": true })))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadFilter);

        assert!(
            compiler()
                .compile(&request(json!({
                    "searchType": "responseFilter_",
                    "search": true,
                    "filter": ["id"]
                })))
                .is_ok()
        );
    }

    #[test]
    fn test_attribute_and_tags_run_once() {
        let query = compiler()
            .compile(&request(json!({
                "searchType": "attributeSearch_tagsSearch_",
                "property": ["tags"],
                "value": [["flood"]]
            })))
            .unwrap();
        assert_eq!(query.as_bool().unwrap().filter.len(), 1);
    }

    #[test]
    fn test_compile_body() {
        let body = compiler()
            .compile_body(&request(json!({
                "searchType": "textSearch_responseFilter_",
                "q": "aqm",
                "search": true,
                "attrs": ["id", "name"],
                "filter": ["tags"],
                "offset": 20
            })))
            .unwrap();
        let json = body.to_json();
        assert_eq!(json["size"], json!(10));
        assert_eq!(json["from"], json!(20));
        assert_eq!(json["_source"], json!(["id", "name"]));
    }

    #[test]
    fn test_compile_body_without_paging() {
        let body = compiler()
            .compile_body(&request(json!({ "searchType": "textSearch_", "q": "aqm" })))
            .unwrap();
        let json = body.to_json();
        assert!(json.get("size").is_none());
        assert!(json.get("from").is_none());
        assert!(json.get("_source").is_none());
    }
}

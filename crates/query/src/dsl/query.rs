//! Query nodes.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

use super::shape::{Shape, SpatialRelation};

/// A node of the query tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Exact value match on a keyword field.
    Term(TermQuery),
    /// Analyzed match on a field.
    Match(MatchQuery),
    /// Lucene query-string search over analyzed text.
    QueryString(QueryStringQuery),
    /// Compound boolean query.
    Bool(BoolQuery),
    /// Spatial relation against a geo-shape field.
    GeoShape(GeoShapeQuery),
    /// Matches every document.
    MatchAll,
}

/// `{"term": {field: value}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    /// Target field.
    pub field: String,
    /// Exact value.
    pub value: String,
}

/// `{"match": {field: {"query": value}}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    /// Target field.
    pub field: String,
    /// Query text.
    pub query: String,
}

/// `{"query_string": {"query": ...}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryStringQuery {
    /// The query text, wildcards included.
    pub query: String,
    /// Whether wildcard terms are analyzed.
    pub analyze_wildcard: bool,
}

/// `{"bool": {...}}`
///
/// Empty clause lists are omitted when rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoolQuery {
    /// Non-scoring clauses that must all match.
    pub filter: Vec<Query>,
    /// Scoring clauses that must all match.
    pub must: Vec<Query>,
    /// Clauses that must not match.
    pub must_not: Vec<Query>,
    /// Optional clauses; see `minimum_should_match`.
    pub should: Vec<Query>,
    /// Minimum number of `should` clauses that must match.
    pub minimum_should_match: Option<u32>,
}

/// `{"geo_shape": {field: {"shape": ..., "relation": ...}}}`
#[derive(Debug, Clone, PartialEq)]
pub struct GeoShapeQuery {
    /// Geo-shape field of the document.
    pub field: String,
    /// The query shape.
    pub shape: Shape,
    /// Relation documents must have to the shape.
    pub relation: SpatialRelation,
}

impl Query {
    /// Builds a term query.
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Query::Term(TermQuery {
            field: field.into(),
            value: value.into(),
        })
    }

    /// Builds a match query.
    pub fn match_query(field: impl Into<String>, query: impl Into<String>) -> Self {
        Query::Match(MatchQuery {
            field: field.into(),
            query: query.into(),
        })
    }

    /// Builds a query-string query. Wildcard analysis is enabled when the
    /// text contains `*`.
    pub fn query_string(query: impl Into<String>) -> Self {
        let query = query.into();
        let analyze_wildcard = query.contains('*');
        Query::QueryString(QueryStringQuery {
            query,
            analyze_wildcard,
        })
    }

    /// Builds a geo-shape query.
    pub fn geo_shape(field: impl Into<String>, shape: Shape, relation: SpatialRelation) -> Self {
        Query::GeoShape(GeoShapeQuery {
            field: field.into(),
            shape,
            relation,
        })
    }

    /// Returns the bool node, if this is one.
    pub fn as_bool(&self) -> Option<&BoolQuery> {
        match self {
            Query::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the geo-shape node, if this is one.
    pub fn as_geo_shape(&self) -> Option<&GeoShapeQuery> {
        match self {
            Query::GeoShape(g) => Some(g),
            _ => None,
        }
    }

    /// Returns the term node, if this is one.
    pub fn as_term(&self) -> Option<&TermQuery> {
        match self {
            Query::Term(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the match node, if this is one.
    pub fn as_match(&self) -> Option<&MatchQuery> {
        match self {
            Query::Match(m) => Some(m),
            _ => None,
        }
    }

    /// Renders the node as engine JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Query::Term(t) => json!({ "term": { t.field.as_str(): t.value } }),
            Query::Match(m) => json!({ "match": { m.field.as_str(): { "query": m.query } } }),
            Query::QueryString(q) => {
                if q.analyze_wildcard {
                    json!({ "query_string": { "query": q.query, "analyze_wildcard": true } })
                } else {
                    json!({ "query_string": { "query": q.query } })
                }
            }
            Query::Bool(b) => json!({ "bool": b.to_json() }),
            Query::GeoShape(g) => json!({
                "geo_shape": {
                    g.field.as_str(): {
                        "shape": g.shape.to_json(),
                        "relation": g.relation.as_str()
                    }
                }
            }),
            Query::MatchAll => json!({ "match_all": {} }),
        }
    }
}

impl From<BoolQuery> for Query {
    fn from(b: BoolQuery) -> Self {
        Query::Bool(b)
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl BoolQuery {
    /// Creates an empty bool query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter clause.
    pub fn filter(mut self, query: Query) -> Self {
        self.filter.push(query);
        self
    }

    /// Adds a must clause.
    pub fn must(mut self, query: Query) -> Self {
        self.must.push(query);
        self
    }

    /// Adds a must-not clause.
    pub fn must_not(mut self, query: Query) -> Self {
        self.must_not.push(query);
        self
    }

    /// Adds a should clause.
    pub fn should(mut self, query: Query) -> Self {
        self.should.push(query);
        self
    }

    /// Sets the minimum number of should clauses that must match.
    pub fn minimum_should_match(mut self, n: u32) -> Self {
        self.minimum_should_match = Some(n);
        self
    }

    /// Returns true when no clause has been added.
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.must.is_empty()
            && self.must_not.is_empty()
            && self.should.is_empty()
    }

    /// Wraps the bool query in a [`Query`].
    pub fn into_query(self) -> Query {
        Query::Bool(self)
    }

    fn to_json(&self) -> Value {
        let mut body = Map::new();
        for (slot, clauses) in [
            ("filter", &self.filter),
            ("must", &self.must),
            ("must_not", &self.must_not),
            ("should", &self.should),
        ] {
            if !clauses.is_empty() {
                body.insert(
                    slot.to_string(),
                    Value::Array(clauses.iter().map(Query::to_json).collect()),
                );
            }
        }
        if let Some(n) = self.minimum_should_match {
            body.insert("minimum_should_match".to_string(), json!(n));
        }
        Value::Object(body)
    }
}

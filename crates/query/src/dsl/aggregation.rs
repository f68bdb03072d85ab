//! Terms aggregations for listing endpoints.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

/// A terms aggregation with optional named sub-aggregations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Keyword field to bucket on.
    pub field: String,
    /// Maximum number of buckets returned.
    pub size: u32,
    /// Nested aggregations computed per bucket, keyed by name.
    pub sub_aggregations: BTreeMap<String, Aggregation>,
}

impl Aggregation {
    /// Creates a terms aggregation without sub-aggregations.
    pub fn terms(field: impl Into<String>, size: u32) -> Self {
        Self {
            field: field.into(),
            size,
            sub_aggregations: BTreeMap::new(),
        }
    }

    /// Adds a named sub-aggregation.
    pub fn with_sub_aggregation(mut self, name: impl Into<String>, agg: Aggregation) -> Self {
        self.sub_aggregations.insert(name.into(), agg);
        self
    }

    /// Renders the aggregation as engine JSON.
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "terms": { "field": self.field, "size": self.size }
        });
        if !self.sub_aggregations.is_empty() {
            let subs: Map<String, Value> = self
                .sub_aggregations
                .iter()
                .map(|(name, agg)| (name.clone(), agg.to_json()))
                .collect();
            body["aggs"] = Value::Object(subs);
        }
        body
    }
}

impl Serialize for Aggregation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

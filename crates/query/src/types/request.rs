//! The normalized search request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, QueryError, QueryResult};

/// A search request as produced by the request normalizer.
///
/// Field names follow the wire contract. Every field is optional; the
/// compiler decides which combinations are meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Search-type marker, e.g. `"geoSearch_textSearch_"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,

    /// Item id, used by `getParentObjectInfo`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Document field holding the item's geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geoproperty: Option<String>,

    /// Requested geo relation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub georel: Option<String>,

    /// Geometry name: `Point`, `Polygon`, `LineString` or `bbox`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,

    /// Raw coordinates; their shape depends on `geometry`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Value>,

    /// Radius in metres for point searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,

    /// Free-text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Attribute names, parallel to `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<Vec<String>>,

    /// Accepted values per attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<Vec<String>>>,

    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Page start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Tenancy scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Response filter field list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<String>>,

    /// Response filter field list; takes precedence over `filter`.
    #[serde(default, alias = "attrs", skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Vec<String>>,

    /// Allow-flag gating the response filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<bool>,
}

impl SearchRequest {
    /// Decodes a request from its JSON wire form.
    pub fn from_json(value: Value) -> QueryResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| QueryError::new(ErrorKind::BadRequest, format!("invalid request: {}", e)))
    }

    /// The tenancy scope, ignoring empty strings.
    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns true when the response filter is explicitly allowed.
    pub fn search_allowed(&self) -> bool {
        self.search.unwrap_or(false)
    }

    /// The response filter fields, `attribute` first, then `filter`.
    pub fn response_fields(&self) -> Option<&[String]> {
        self.attribute
            .as_deref()
            .filter(|f| !f.is_empty())
            .or_else(|| self.filter.as_deref().filter(|f| !f.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let req = SearchRequest::from_json(json!({
            "searchType": "geoSearch_",
            "geoproperty": "location",
            "georel": "near",
            "geometry": "Point",
            "coordinates": [73.9, 18.6],
            "maxDistance": 5000
        }))
        .unwrap();

        assert_eq!(req.search_type.as_deref(), Some("geoSearch_"));
        assert_eq!(req.max_distance, Some(5000.0));
        assert_eq!(req.coordinates, Some(json!([73.9, 18.6])));
    }

    #[test]
    fn test_attrs_alias() {
        let req = SearchRequest::from_json(json!({ "attrs": ["id", "name"] })).unwrap();
        assert_eq!(
            req.attribute,
            Some(vec!["id".to_string(), "name".to_string()])
        );
    }

    #[test]
    fn test_response_fields_precedence() {
        let req = SearchRequest {
            attribute: Some(vec!["id".to_string()]),
            filter: Some(vec!["name".to_string()]),
            ..Default::default()
        };
        assert_eq!(req.response_fields(), Some(&["id".to_string()][..]));

        let req = SearchRequest {
            attribute: Some(vec![]),
            filter: Some(vec!["name".to_string()]),
            ..Default::default()
        };
        assert_eq!(req.response_fields(), Some(&["name".to_string()][..]));
    }

    #[test]
    fn test_empty_instance_is_absent() {
        let req = SearchRequest {
            instance: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(req.instance(), None);
    }

    #[test]
    fn test_malformed_request_is_bad_request() {
        let err = SearchRequest::from_json(json!({ "limit": "ten" })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }
}

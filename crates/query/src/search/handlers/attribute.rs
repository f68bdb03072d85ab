//! Attribute and tag search clause builder.
//!
//! `property[i]` pairs with `value[i]`. Values of one property are OR'd in a
//! should group; the groups are AND'd as must clauses.

use crate::dsl::{BoolQuery, KEYWORD_SUFFIX, Query, keyword_field};
use crate::error::{ErrorKind, QueryError, QueryResult};
use crate::search::filter_type::{ClauseBuckets, FilterType};
use crate::types::SearchRequest;

/// Property searched by a tag search.
pub const TAGS_PROPERTY: &str = "tags";

/// Builds the attribute clause and appends it to the filter bucket.
///
/// `default_property` stands in for the property list when the request
/// carries none, as tag searches do.
pub fn append(
    request: &SearchRequest,
    default_property: Option<&str>,
    buckets: &mut ClauseBuckets,
) -> QueryResult<()> {
    let default_properties: Vec<String> = default_property.map(str::to_string).into_iter().collect();
    let properties = request
        .property
        .as_deref()
        .unwrap_or(default_properties.as_slice());
    let values = request.value.as_deref().unwrap_or(&[]);

    let clause = build_clause(properties, values)?;
    buckets.push(FilterType::Filter, clause);
    Ok(())
}

/// Builds the must-of-shoulds clause for parallel property/value arrays.
pub fn build_clause(properties: &[String], values: &[Vec<String>]) -> QueryResult<Query> {
    tracing::debug!("attribute search block");

    if properties.is_empty() || properties.len() != values.len() {
        return Err(invalid_property_value());
    }

    let mut must = BoolQuery::new();
    for (property, accepted) in properties.iter().zip(values) {
        if property.is_empty() || accepted.is_empty() {
            return Err(invalid_property_value());
        }
        let field = attribute_field(property);
        let group = accepted
            .iter()
            .fold(BoolQuery::new(), |group, value| {
                group.should(Query::match_query(field.as_str(), value.as_str()))
            });
        must = must.must(group.into_query());
    }
    Ok(must.into_query())
}

/// Maps a property name to the indexed field it is matched against.
///
/// Analyzed text fields (`description`, `location*`) are used as is; every
/// other property targets its `.keyword` sub-field.
pub fn attribute_field(property: &str) -> String {
    if property.ends_with(KEYWORD_SUFFIX)
        || property == "description"
        || property.starts_with("location")
    {
        property.to_string()
    } else {
        keyword_field(property)
    }
}

fn invalid_property_value() -> QueryError {
    QueryError::new(ErrorKind::InvalidPropertyValue, "Invalid Property Value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_single_tag() {
        let clause = build_clause(&strings(&["tags"]), &[strings(&["flood"])]).unwrap();
        assert_eq!(
            clause.to_json(),
            json!({
                "bool": {
                    "must": [
                        { "bool": { "should": [ { "match": { "tags.keyword": { "query": "flood" } } } ] } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_values_or_properties_and() {
        let clause = build_clause(
            &strings(&["tags", "provider"]),
            &[strings(&["flood", "rain"]), strings(&["p1"])],
        )
        .unwrap();
        let must = &clause.as_bool().unwrap().must;
        assert_eq!(must.len(), 2);
        assert_eq!(must[0].as_bool().unwrap().should.len(), 2);
        assert_eq!(
            must[1].as_bool().unwrap().should[0],
            Query::match_query("provider.keyword", "p1")
        );
    }

    #[test]
    fn test_field_naming() {
        assert_eq!(attribute_field("tags"), "tags.keyword");
        assert_eq!(attribute_field("id"), "id.keyword");
        assert_eq!(attribute_field("name.keyword"), "name.keyword");
        assert_eq!(attribute_field("description"), "description");
        assert_eq!(attribute_field("location.address"), "location.address");
    }

    #[test]
    fn test_mismatched_arrays() {
        for (properties, values) in [
            (strings(&["tags", "id"]), vec![strings(&["flood"])]),
            (strings(&[]), vec![]),
            (strings(&["tags"]), vec![strings(&[])]),
        ] {
            let err = build_clause(&properties, &values).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPropertyValue);
            assert_eq!(err.detail(), "Invalid Property Value");
        }
    }

    #[test]
    fn test_default_property_for_tags() {
        let req = SearchRequest {
            search_type: Some("tagsSearch_".to_string()),
            value: Some(vec![strings(&["flood"])]),
            ..Default::default()
        };
        let mut buckets = ClauseBuckets::new();
        append(&req, Some(TAGS_PROPERTY), &mut buckets).unwrap();

        let json = serde_json::to_string(&buckets.get(FilterType::Filter)[0]).unwrap();
        assert!(json.contains("tags.keyword"));
    }

    #[test]
    fn test_missing_property_without_default() {
        let req = SearchRequest {
            value: Some(vec![strings(&["flood"])]),
            ..Default::default()
        };
        let err = append(&req, None, &mut ClauseBuckets::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPropertyValue);
    }
}

//! Geo search clause builder.

use serde_json::Value;

use crate::dsl::{Position, Query, Shape, SpatialRelation};
use crate::error::{QueryError, QueryResult};
use crate::search::filter_type::{ClauseBuckets, FilterType};
use crate::types::{GeoRelation, Geometry, SearchRequest};

const MISSING_GEO_PARAMS: &str = "Missing/Invalid geo parameters";

/// Builds the geo-shape clause and appends it to the filter bucket.
pub fn append(request: &SearchRequest, buckets: &mut ClauseBuckets) -> QueryResult<()> {
    let clause = build_clause(request)?;
    buckets.push(FilterType::Filter, clause);
    Ok(())
}

/// Builds a geo-shape clause for a geo search.
pub fn build_clause(request: &SearchRequest) -> QueryResult<Query> {
    tracing::debug!("geo search block");

    let (Some(field), Some(georel), Some(geometry), Some(coordinates)) = (
        request.geoproperty.as_deref().filter(|s| !s.is_empty()),
        request.georel.as_deref(),
        request.geometry.as_deref(),
        request.coordinates.as_ref(),
    ) else {
        return Err(QueryError::invalid_geo_param(MISSING_GEO_PARAMS));
    };

    let geometry: Geometry = geometry
        .parse()
        .map_err(|_| QueryError::invalid_geo_param(MISSING_GEO_PARAMS))?;
    let georel: GeoRelation = georel
        .parse()
        .map_err(|_| QueryError::invalid_geo_param(format!("Invalid georel: {}", georel)))?;

    let shape = build_shape(geometry, coordinates, request.max_distance)?;
    let relation = spatial_relation(&shape, georel)?;

    Ok(Query::geo_shape(field, shape, relation))
}

/// Parses coordinates into a shape for the given geometry.
fn build_shape(
    geometry: Geometry,
    coordinates: &Value,
    max_distance: Option<f64>,
) -> QueryResult<Shape> {
    match geometry {
        Geometry::Point => {
            let center = parse_position(coordinates)?;
            match max_distance {
                Some(radius) if radius.is_finite() && radius > 0.0 => {
                    Ok(Shape::Circle { center, radius })
                }
                Some(radius) => Err(QueryError::invalid_geo_value(format!(
                    "Invalid maxDistance: {}",
                    radius
                ))),
                None => Ok(Shape::Point(center)),
            }
        }
        Geometry::LineString => {
            let positions = parse_positions(coordinates)?;
            if positions.len() < 2 {
                return Err(QueryError::invalid_geo_value(
                    "LineString requires at least 2 positions",
                ));
            }
            Ok(Shape::LineString(positions))
        }
        Geometry::Polygon => {
            let rings = coordinates
                .as_array()
                .filter(|rings| !rings.is_empty())
                .ok_or_else(|| QueryError::invalid_geo_value("Invalid polygon coordinates"))?
                .iter()
                .map(parse_ring)
                .collect::<QueryResult<Vec<_>>>()?;
            Ok(Shape::Polygon(rings))
        }
        Geometry::Bbox => {
            let corners = parse_positions(coordinates)?;
            match corners.as_slice() {
                [upper_left, lower_right] => Ok(Shape::Envelope([*upper_left, *lower_right])),
                _ => Err(QueryError::invalid_geo_value(
                    "bbox requires exactly 2 positions",
                )),
            }
        }
    }
}

/// Maps the requested relation onto the engine relation for this shape.
fn spatial_relation(shape: &Shape, georel: GeoRelation) -> QueryResult<SpatialRelation> {
    let relation = match (shape, georel) {
        (_, GeoRelation::Intersects) => Some(SpatialRelation::Intersects),
        (_, GeoRelation::Disjoint) => Some(SpatialRelation::Disjoint),
        (Shape::Circle { .. }, GeoRelation::Near) => Some(SpatialRelation::Intersects),
        (Shape::Circle { .. }, GeoRelation::Within) => Some(SpatialRelation::Within),
        (Shape::Point(_), GeoRelation::Equals) => Some(SpatialRelation::Intersects),
        (
            Shape::Polygon(_) | Shape::LineString(_) | Shape::Envelope(_),
            GeoRelation::Within | GeoRelation::CoveredBy,
        ) => Some(SpatialRelation::Within),
        _ => None,
    };

    relation.ok_or_else(|| {
        QueryError::invalid_geo_value(format!(
            "georel '{}' is not valid for {}",
            georel,
            shape.type_name()
        ))
    })
}

fn parse_position(value: &Value) -> QueryResult<Position> {
    let invalid = || QueryError::invalid_geo_value(format!("Invalid coordinate: {}", value));

    let [lon, lat] = value.as_array().map(Vec::as_slice).ok_or_else(invalid)? else {
        return Err(invalid());
    };
    match (lon.as_f64(), lat.as_f64()) {
        (Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() => Ok([lon, lat]),
        _ => Err(invalid()),
    }
}

fn parse_positions(value: &Value) -> QueryResult<Vec<Position>> {
    value
        .as_array()
        .ok_or_else(|| QueryError::invalid_geo_value(format!("Invalid coordinates: {}", value)))?
        .iter()
        .map(parse_position)
        .collect()
}

fn parse_ring(value: &Value) -> QueryResult<Vec<Position>> {
    let ring = parse_positions(value)?;
    if ring.len() < 4 {
        return Err(QueryError::invalid_geo_value(
            "Polygon ring requires at least 4 positions",
        ));
    }
    if ring.first() != ring.last() {
        return Err(QueryError::invalid_geo_value(
            "Invalid coordinate polygon: ring is not closed",
        ));
    }
    Ok(ring)
}

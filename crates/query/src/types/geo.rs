//! Geo search vocabulary.

use std::fmt;
use std::str::FromStr;

/// Geometry of a geo search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Geometry {
    /// A point, optionally widened to a circle by `maxDistance`.
    Point,
    /// A closed polygon.
    Polygon,
    /// An open line string.
    LineString,
    /// A bounding box given by two corners.
    Bbox,
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point => write!(f, "Point"),
            Geometry::Polygon => write!(f, "Polygon"),
            Geometry::LineString => write!(f, "LineString"),
            Geometry::Bbox => write!(f, "bbox"),
        }
    }
}

impl FromStr for Geometry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "point" => Ok(Geometry::Point),
            "polygon" => Ok(Geometry::Polygon),
            "linestring" => Ok(Geometry::LineString),
            "bbox" => Ok(Geometry::Bbox),
            _ => Err(format!("unknown geometry: {}", s)),
        }
    }
}

/// Requested relation between the query geometry and catalogue items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoRelation {
    /// Items within the geometry.
    Within,
    /// Items within `maxDistance` of a point.
    Near,
    /// Items covered by the geometry.
    CoveredBy,
    /// Items intersecting the geometry.
    Intersects,
    /// Items located exactly at a point.
    Equals,
    /// Items sharing nothing with the geometry.
    Disjoint,
}

impl fmt::Display for GeoRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoRelation::Within => write!(f, "within"),
            GeoRelation::Near => write!(f, "near"),
            GeoRelation::CoveredBy => write!(f, "coveredBy"),
            GeoRelation::Intersects => write!(f, "intersects"),
            GeoRelation::Equals => write!(f, "equals"),
            GeoRelation::Disjoint => write!(f, "disjoint"),
        }
    }
}

impl FromStr for GeoRelation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "within" => Ok(GeoRelation::Within),
            "near" => Ok(GeoRelation::Near),
            "coveredby" => Ok(GeoRelation::CoveredBy),
            "intersects" => Ok(GeoRelation::Intersects),
            "equals" => Ok(GeoRelation::Equals),
            "disjoint" => Ok(GeoRelation::Disjoint),
            _ => Err(format!("unknown georel: {}", s)),
        }
    }
}

//! Geo-shape query shapes and spatial relations.

use serde_json::{Value, json};

/// A `[longitude, latitude]` pair.
pub type Position = [f64; 2];

/// The shape a geo-shape query compares documents against.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A circle of `radius` metres around `center`.
    Circle {
        /// Circle centre.
        center: Position,
        /// Radius in metres.
        radius: f64,
    },
    /// A single position.
    Point(Position),
    /// An open path of at least two positions.
    LineString(Vec<Position>),
    /// One or more closed linear rings; the first is the outer boundary.
    Polygon(Vec<Vec<Position>>),
    /// A bounding box given as `[[minLon, maxLat], [maxLon, minLat]]`.
    Envelope([Position; 2]),
}

impl Shape {
    /// Returns the engine's name for the shape type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::Point(_) => "point",
            Shape::LineString(_) => "linestring",
            Shape::Polygon(_) => "polygon",
            Shape::Envelope(_) => "envelope",
        }
    }

    /// Renders the shape as GeoJSON-style engine JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Shape::Circle { center, radius } => json!({
                "type": self.type_name(),
                "coordinates": center,
                "radius": format!("{}m", radius)
            }),
            Shape::Point(position) => json!({
                "type": self.type_name(),
                "coordinates": position
            }),
            Shape::LineString(positions) => json!({
                "type": self.type_name(),
                "coordinates": positions
            }),
            Shape::Polygon(rings) => json!({
                "type": self.type_name(),
                "coordinates": rings
            }),
            Shape::Envelope(corners) => json!({
                "type": self.type_name(),
                "coordinates": corners
            }),
        }
    }
}

/// Spatial relations understood by the engine's geo-shape query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialRelation {
    /// Documents whose shape intersects the query shape.
    Intersects,
    /// Documents whose shape has nothing in common with the query shape.
    Disjoint,
    /// Documents whose shape lies within the query shape.
    Within,
}

impl SpatialRelation {
    /// Returns the engine's name for the relation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialRelation::Intersects => "intersects",
            SpatialRelation::Disjoint => "disjoint",
            SpatialRelation::Within => "within",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_rendering() {
        let circle = Shape::Circle {
            center: [73.9, 18.6],
            radius: 5000.0,
        };
        assert_eq!(
            circle.to_json(),
            json!({ "type": "circle", "coordinates": [73.9, 18.6], "radius": "5000m" })
        );
    }

    #[test]
    fn test_fractional_radius_keeps_precision() {
        let circle = Shape::Circle {
            center: [0.0, 0.0],
            radius: 12.5,
        };
        assert_eq!(circle.to_json()["radius"], json!("12.5m"));
    }

    #[test]
    fn test_envelope_rendering() {
        let bbox = Shape::Envelope([[73.0, 20.0], [75.0, 14.0]]);
        assert_eq!(
            bbox.to_json(),
            json!({ "type": "envelope", "coordinates": [[73.0, 20.0], [75.0, 14.0]] })
        );
    }
}

//! Geometry values and their wire encoding
//!
//! Points and polylines use `geo` primitives. The JSON shape follows the
//! host server's geometry encoding:
//!
//! ```text
//! point     {"x": 1.0, "y": 2.0, "spatialReference": {"wkid": 3003}}
//! polyline  {"paths": [[[0,0],[1,0]]], "spatialReference": {...}}
//! envelope  {"xmin": 0, "ymin": 0, "xmax": 1, "ymax": 1, "spatialReference": {...}}
//! ```

use crate::shared::utils::closest_point;
use geo::{BoundingRect, ClosestPoint, Coord, EuclideanDistance, LineString, MultiLineString, Point, Rect};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Spatial reference of a network, by well-known id or definition text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkid: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkt: Option<String>,
}

impl SpatialReference {
    pub fn from_wkid(wkid: i32) -> Self {
        Self {
            wkid: Some(wkid),
            wkt: None,
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Geometry returned by queries and position-along solves
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point<f64>),
    Polyline(MultiLineString<f64>),
}

impl Geometry {
    pub fn polyline(parts: Vec<LineString<f64>>) -> Self {
        Geometry::Polyline(MultiLineString::new(parts))
    }

    /// Planar distance between `point` and this geometry
    pub fn distance_to(&self, point: &Point<f64>) -> f64 {
        match self {
            Geometry::Point(p) => p.euclidean_distance(point),
            Geometry::Polyline(lines) if lines.0.iter().any(|l| !l.0.is_empty()) => point.euclidean_distance(lines),
            Geometry::Polyline(_) => f64::INFINITY,
        }
    }

    /// Nearest location on this geometry to `point`
    pub fn nearest_point(&self, point: &Point<f64>) -> Option<Point<f64>> {
        match self {
            Geometry::Point(p) => Some(*p),
            Geometry::Polyline(lines) => closest_point(lines.closest_point(point)),
        }
    }

    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            Geometry::Point(p) => Some(p.bounding_rect()),
            Geometry::Polyline(lines) => lines.bounding_rect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(p) => p.x().is_nan() || p.y().is_nan(),
            Geometry::Polyline(lines) => lines.0.iter().all(|l| l.0.len() < 2),
        }
    }

    /// Host geometry JSON, optionally tagged with a spatial reference
    pub fn to_json(&self, spatial_reference: Option<&SpatialReference>) -> Value {
        let mut value = match self {
            Geometry::Point(p) => point_to_json(p),
            Geometry::Polyline(lines) => {
                let paths: Vec<Value> = lines
                    .0
                    .iter()
                    .map(|line| Value::Array(line.0.iter().map(|c| json!([c.x, c.y])).collect()))
                    .collect();
                json!({ "paths": paths })
            }
        };
        if let (Some(sr), Value::Object(map)) = (spatial_reference, &mut value) {
            map.insert("spatialReference".to_string(), sr.to_json());
        }
        value
    }

    /// Decode a point or polyline; anything else is `None`
    pub fn from_json(value: &Value) -> Option<Geometry> {
        if let Some(point) = point_from_json(value) {
            return Some(Geometry::Point(point));
        }
        let paths = value.get("paths")?.as_array()?;
        let mut parts = Vec::with_capacity(paths.len());
        for path in paths {
            let coords = path
                .as_array()?
                .iter()
                .map(coord_from_json)
                .collect::<Option<Vec<_>>>()?;
            parts.push(LineString::new(coords));
        }
        Some(Geometry::polyline(parts))
    }
}

pub fn point_to_json(point: &Point<f64>) -> Value {
    json!({ "x": point.x(), "y": point.y() })
}

pub fn point_from_json(value: &Value) -> Option<Point<f64>> {
    let x = value.get("x")?.as_f64()?;
    let y = value.get("y")?.as_f64()?;
    Some(Point::new(x, y))
}

pub fn points_to_json(points: &[Point<f64>]) -> Value {
    Value::Array(points.iter().map(point_to_json).collect())
}

fn coord_from_json(value: &Value) -> Option<Coord<f64>> {
    let pair = value.as_array()?;
    Some(Coord {
        x: pair.first()?.as_f64()?,
        y: pair.get(1)?.as_f64()?,
    })
}

/// Extent of a network
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope(pub Rect<f64>);

impl Envelope {
    pub fn to_json(&self, spatial_reference: &SpatialReference) -> Value {
        let mut map = Map::new();
        map.insert("xmin".into(), json!(self.0.min().x));
        map.insert("ymin".into(), json!(self.0.min().y));
        map.insert("xmax".into(), json!(self.0.max().x));
        map.insert("ymax".into(), json!(self.0.max().y));
        map.insert("spatialReference".into(), spatial_reference.to_json());
        Value::Object(map)
    }
}

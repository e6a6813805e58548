//! Position-along request and outcome

use crate::errors::{GeonetError, Result};
use crate::shared::models::{points_to_json, Geometry, Point, SpatialReference};
use serde_json::{json, Map, Value};

/// Informational message when the walk ran out of network
pub const DISTANCE_EXCEEDS_NETWORK: &str = "The set distance exceeds the length of network";

#[derive(Debug, Clone, PartialEq)]
pub struct PosAlongRequest {
    /// Exactly one edge flag is supported
    pub edge_flags: Vec<Point<f64>>,
    /// Positive walks downstream, negative upstream
    pub length: f64,
    /// Integer stream-order field read on edges
    pub field_level: Option<String>,
    pub offset: Option<f64>,
    pub tolerance: f64,
    pub same_order: bool,
}

impl PosAlongRequest {
    pub fn new(flag: Point<f64>, length: f64) -> Self {
        Self {
            edge_flags: vec![flag],
            length,
            field_level: None,
            offset: None,
            tolerance: 0.0,
            same_order: false,
        }
    }

    pub fn with_field_level(mut self, field: impl Into<String>) -> Self {
        self.field_level = Some(field.into());
        self
    }

    pub fn with_same_order(mut self, same_order: bool) -> Self {
        self.same_order = same_order;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn is_downstream(&self) -> bool {
        self.length > 0.0
    }

    /// Order field is needed upstream and for same-order downstream walks
    pub fn needs_field_level(&self) -> bool {
        self.length < 0.0 || (self.length > 0.0 && self.same_order)
    }

    pub fn validate(&self) -> Result<()> {
        if self.edge_flags.len() != 1 {
            return Err(GeonetError::validation("edgeFlags != 1"));
        }
        if self.length == 0.0 || !self.length.is_finite() {
            return Err(GeonetError::validation("distance not valid"));
        }
        if self.needs_field_level() && self.field_level.as_deref().map_or(true, str::is_empty) {
            return Err(GeonetError::validation("fieldLevel not specified"));
        }
        if !(self.tolerance >= 0.0) || !self.tolerance.is_finite() {
            return Err(GeonetError::validation("invalid tolerance"));
        }
        Ok(())
    }

    /// Order field, validated to be present by [`Self::validate`]
    pub(crate) fn level_field(&self) -> Result<&str> {
        self.field_level
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| GeonetError::validation("fieldLevel not specified"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PosAlongOutcome {
    /// Flag point did not snap to an edge; not an error
    FlagNotFound(Point<f64>),
    Located {
        geometry: Geometry,
        message: Option<String>,
    },
}

impl PosAlongOutcome {
    pub fn message(&self) -> Option<&str> {
        match self {
            PosAlongOutcome::Located { message, .. } => message.as_deref(),
            PosAlongOutcome::FlagNotFound(_) => None,
        }
    }

    pub fn to_json(&self, spatial_reference: &SpatialReference) -> Value {
        match self {
            PosAlongOutcome::FlagNotFound(point) => json!({ "flagsNotFound": points_to_json(&[*point]) }),
            PosAlongOutcome::Located { geometry, message } => {
                let mut body = Map::new();
                body.insert("geometry".into(), geometry.to_json(Some(spatial_reference)));
                if let Some(message) = message {
                    body.insert("message".into(), json!(message));
                }
                Value::Object(body)
            }
        }
    }
}

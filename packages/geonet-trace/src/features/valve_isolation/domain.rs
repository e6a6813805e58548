//! Isolation request and outcome

use crate::errors::{GeonetError, Result};
use crate::features::flags::FlagInputs;
use crate::features::materialize::{MaterializedResult, OutFields};
use crate::shared::models::{points_to_json, Eid, FeatureSet, FlowElements, Point};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct IsolationRequest {
    /// Feature class of the supply stations (sources)
    pub station_class: i32,
    pub valve_class: i32,
    pub flow_elements: FlowElements,
    /// Flags only; barrier points are not used by isolation
    pub inputs: FlagInputs,
    pub out_fields: OutFields,
    pub max_features: usize,
    pub tolerance: f64,
}

impl IsolationRequest {
    pub fn new(station_class: i32, valve_class: i32, flow_elements: FlowElements, inputs: FlagInputs) -> Self {
        Self {
            station_class,
            valve_class,
            flow_elements,
            inputs,
            out_fields: OutFields::All,
            max_features: i32::MAX as usize,
            tolerance: 0.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance >= 0.0) || !self.tolerance.is_finite() {
            return Err(GeonetError::validation("invalid tolerance"));
        }
        if self.max_features > i32::MAX as usize {
            return Err(GeonetError::validation("invalid maxTracedFeatures"));
        }
        if self.inputs.flag_count() == 0 {
            return Err(GeonetError::validation("edgeFlags and/or junctionFlags not found"));
        }
        Ok(())
    }
}

/// A valve or station junction found during isolation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsolationJunction {
    pub eid: Eid,
    pub oid: i32,
}

/// Valve classification produced by the per-valve path tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValveClassification {
    /// Valves through which a remaining source is reachable; these must close
    pub has_source: Vec<IsolationJunction>,
    pub no_source: Vec<IsolationJunction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsolationOutcome {
    pub features: MaterializedResult,
    /// Feature set of the `has_source` valves, absent when none must close
    pub valves: Option<FeatureSet>,
    pub classification: ValveClassification,
    pub flags_not_found: Vec<Point<f64>>,
}

impl IsolationOutcome {
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(edges) = self.features.edges_json() {
            body.insert("edges".into(), edges);
        }
        if let Some(junctions) = self.features.junctions_json() {
            body.insert("junctions".into(), junctions);
        }
        body.insert("flagsNotFound".into(), points_to_json(&self.flags_not_found));
        if let Some(valves) = &self.valves {
            body.insert("valves".into(), valves.to_json());
        }
        Value::Object(body)
    }
}

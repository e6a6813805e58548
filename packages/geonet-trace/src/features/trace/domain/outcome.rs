//! Trace outcome and response encoding

use crate::features::materialize::MaterializedResult;
use crate::shared::models::{points_to_json, Point};
use crate::shared::ports::TraceElements;
use serde_json::{json, Map, Value};

/// What a solver pass produced before materialization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolvedTrace {
    pub elements: TraceElements,
    pub total_cost: Option<f64>,
    pub segment_costs: Option<Vec<Option<f64>>>,
}

impl SolvedTrace {
    pub fn elements(elements: TraceElements) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceOutcome {
    pub solved: SolvedTrace,
    pub features: MaterializedResult,
    pub flags_not_found: Vec<Point<f64>>,
    pub barriers_not_found: Vec<Point<f64>>,
}

impl TraceOutcome {
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(edges) = self.features.edges_json() {
            body.insert("edges".into(), edges);
        }
        if let Some(junctions) = self.features.junctions_json() {
            body.insert("junctions".into(), junctions);
        }
        if let Some(total_cost) = self.solved.total_cost {
            body.insert("totalCost".into(), json!(total_cost));
        }
        if let Some(costs) = &self.solved.segment_costs {
            body.insert("segmentCosts".into(), json!(costs));
        }
        body.insert("flagsNotFound".into(), points_to_json(&self.flags_not_found));
        body.insert("barriersNotFound".into(), points_to_json(&self.barriers_not_found));
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outcome_json_keys() {
        let outcome = TraceOutcome {
            solved: SolvedTrace {
                elements: TraceElements::default(),
                total_cost: None,
                segment_costs: Some(vec![Some(12.5), None]),
            },
            features: MaterializedResult {
                edges: Some(vec![]),
                junctions: None,
            },
            flags_not_found: vec![Point::new(3.0, 4.0)],
            barriers_not_found: vec![],
        };
        assert_eq!(
            outcome.to_json(),
            json!({
                "edges": [],
                "segmentCosts": [12.5, null],
                "flagsNotFound": [{"x": 3.0, "y": 4.0}],
                "barriersNotFound": []
            })
        );
    }
}

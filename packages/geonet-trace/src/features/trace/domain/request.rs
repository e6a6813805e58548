//! Trace request and its up-front validation

use super::mode::TraceMode;
use crate::errors::{GeonetError, Result};
use crate::features::flags::FlagInputs;
use crate::features::materialize::OutFields;
use crate::features::weights::WeightRequest;
use crate::shared::models::FlowElements;

#[derive(Debug, Clone, PartialEq)]
pub struct TraceRequest {
    pub mode: TraceMode,
    pub flow_elements: FlowElements,
    pub inputs: FlagInputs,
    /// Feature classes excluded from traversal
    pub disabled_classes: Vec<i32>,
    pub weights: WeightRequest,
    pub out_fields: OutFields,
    pub max_features: usize,
    pub tolerance: f64,
    pub trace_indeterminate_flow: bool,
}

impl TraceRequest {
    pub fn new(mode: TraceMode, flow_elements: FlowElements, inputs: FlagInputs) -> Self {
        Self {
            mode,
            flow_elements,
            inputs,
            disabled_classes: Vec::new(),
            weights: WeightRequest::default(),
            out_fields: OutFields::All,
            max_features: i32::MAX as usize,
            tolerance: 0.0,
            trace_indeterminate_flow: false,
        }
    }

    /// Checks that need no network access
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance >= 0.0) || !self.tolerance.is_finite() {
            return Err(GeonetError::validation("invalid tolerance"));
        }
        if self.max_features > i32::MAX as usize {
            return Err(GeonetError::validation("invalid maxTracedFeatures"));
        }

        let edges = self.inputs.edge_flags.len();
        let junctions = self.inputs.junction_flags.len();
        if edges + junctions == 0 {
            return Err(GeonetError::validation("edgeFlags and/or junctionFlags not found"));
        }

        match self.mode {
            TraceMode::FindPath { .. } => {
                if edges > 0 && junctions > 0 {
                    return Err(GeonetError::validation(
                        "FindPath: the flags you place on the network must be either all edge or all junction. \
                         You cannot find a path among a mixture of edge and junction origins",
                    ));
                }
                if edges == 1 {
                    return Err(GeonetError::validation(
                        "FindPath: the flags edge you place on the network must be > 1.",
                    ));
                }
                if junctions == 1 {
                    return Err(GeonetError::validation(
                        "FindPath: the flags junction you place on the network must be > 1.",
                    ));
                }
            }
            TraceMode::FindLongest => {
                if junctions != 1 || edges != 0 {
                    return Err(GeonetError::validation(
                        "FindLongest: the flag junction you place on the network must be = 1. No edges.",
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{FlowMethod, Point, ShortestPathObjFn};

    fn inputs(edges: usize, junctions: usize) -> FlagInputs {
        FlagInputs {
            edge_flags: (0..edges).map(|i| Point::new(i as f64, 0.0)).collect(),
            junction_flags: (0..junctions).map(|i| Point::new(i as f64, 1.0)).collect(),
            ..FlagInputs::default()
        }
    }

    fn find_path() -> TraceMode {
        TraceMode::FindPath {
            flow_method: FlowMethod::Connected,
            objective: ShortestPathObjFn::MinSum,
        }
    }

    #[test]
    fn test_find_path_single_edge_flag_rejected() {
        for junctions in 0..3 {
            let request = TraceRequest::new(find_path(), FlowElements::Edges, inputs(1, junctions));
            assert!(request.validate().unwrap_err().is_validation());
        }
    }

    #[test]
    fn test_find_path_two_junctions_accepted() {
        let request = TraceRequest::new(find_path(), FlowElements::Edges, inputs(0, 2));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_find_longest_flag_counts() {
        let ok = TraceRequest::new(TraceMode::FindLongest, FlowElements::Edges, inputs(0, 1));
        assert!(ok.validate().is_ok());
        let two = TraceRequest::new(TraceMode::FindLongest, FlowElements::Edges, inputs(0, 2));
        assert!(two.validate().unwrap_err().is_validation());
        let edge = TraceRequest::new(TraceMode::FindLongest, FlowElements::Edges, inputs(1, 1));
        assert!(edge.validate().is_err());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let mut request = TraceRequest::new(TraceMode::FindCircuits, FlowElements::Edges, inputs(1, 0));
        request.tolerance = -0.5;
        assert_eq!(request.validate().unwrap_err().to_string(), "invalid tolerance");
        request.tolerance = f64::NAN;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_no_flag_points_rejected() {
        let request = TraceRequest::new(TraceMode::FindCircuits, FlowElements::Edges, inputs(0, 0));
        assert!(request.validate().is_err());
    }
}

//! Trace modes
//!
//! One variant per solver, carrying exactly the parameters that solver uses.

use crate::errors::{GeonetError, Result};
use crate::shared::models::{FlowMethod, ShortestPathObjFn, TraceSolverType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    /// Reachable sets plus the accumulated cost
    FindAccumulation { flow_method: FlowMethod },
    FindCircuits,
    FindCommonAncestors,
    FindFlowElements { flow_method: FlowMethod },
    FindFlowEndElements { flow_method: FlowMethod },
    FindFlowUnreachedElements { flow_method: FlowMethod },
    /// Paths between consecutive flags of one kind
    FindPath {
        flow_method: FlowMethod,
        objective: ShortestPathObjFn,
    },
    /// Path from every flag to its nearest source
    FindSource {
        flow_method: FlowMethod,
        objective: ShortestPathObjFn,
    },
    /// Longest upstream path from a single junction flag
    FindLongest,
}

impl TraceMode {
    /// Build a mode from request values
    ///
    /// The flow method is required unless the solver ignores it; the
    /// objective is required for `FindSource` and defaults to `MinMax` for
    /// `FindPath`.
    pub fn from_parts(
        solver_type: TraceSolverType,
        flow_method: Option<FlowMethod>,
        objective: Option<ShortestPathObjFn>,
    ) -> Result<Self> {
        let method = || flow_method.ok_or_else(|| GeonetError::validation("flowMethod not specified"));

        Ok(match solver_type {
            TraceSolverType::FindAccumulation => TraceMode::FindAccumulation { flow_method: method()? },
            TraceSolverType::FindCircuits => TraceMode::FindCircuits,
            TraceSolverType::FindCommonAncestors => TraceMode::FindCommonAncestors,
            TraceSolverType::FindFlowElements => TraceMode::FindFlowElements { flow_method: method()? },
            TraceSolverType::FindFlowEndElements => TraceMode::FindFlowEndElements { flow_method: method()? },
            TraceSolverType::FindFlowUnreachedElements => {
                TraceMode::FindFlowUnreachedElements { flow_method: method()? }
            }
            TraceSolverType::FindPath => TraceMode::FindPath {
                flow_method: method()?,
                objective: objective.unwrap_or_default(),
            },
            TraceSolverType::FindSource => TraceMode::FindSource {
                flow_method: method()?,
                objective: objective
                    .ok_or_else(|| GeonetError::validation("shortestPathObjFn not specified"))?,
            },
            TraceSolverType::FindLongest => TraceMode::FindLongest,
        })
    }

    pub fn solver_type(&self) -> TraceSolverType {
        match self {
            TraceMode::FindAccumulation { .. } => TraceSolverType::FindAccumulation,
            TraceMode::FindCircuits => TraceSolverType::FindCircuits,
            TraceMode::FindCommonAncestors => TraceSolverType::FindCommonAncestors,
            TraceMode::FindFlowElements { .. } => TraceSolverType::FindFlowElements,
            TraceMode::FindFlowEndElements { .. } => TraceSolverType::FindFlowEndElements,
            TraceMode::FindFlowUnreachedElements { .. } => TraceSolverType::FindFlowUnreachedElements,
            TraceMode::FindPath { .. } => TraceSolverType::FindPath,
            TraceMode::FindSource { .. } => TraceSolverType::FindSource,
            TraceMode::FindLongest => TraceSolverType::FindLongest,
        }
    }

    /// Flow method driving the solve
    ///
    /// `FindLongest` takes no `flowMethod` from the request: both of its
    /// passes (end junctions, then the heaviest path to one of them) walk
    /// upstream, so upstream is the method its solve runs under and the one
    /// that gates indeterminate flow.
    pub fn flow_method(&self) -> Option<FlowMethod> {
        match self {
            TraceMode::FindAccumulation { flow_method }
            | TraceMode::FindFlowElements { flow_method }
            | TraceMode::FindFlowEndElements { flow_method }
            | TraceMode::FindFlowUnreachedElements { flow_method }
            | TraceMode::FindPath { flow_method, .. }
            | TraceMode::FindSource { flow_method, .. } => Some(*flow_method),
            TraceMode::FindLongest => Some(FlowMethod::Upstream),
            TraceMode::FindCircuits | TraceMode::FindCommonAncestors => None,
        }
    }

    /// Indeterminate flow only matters for directed traces
    ///
    /// Gated on [`TraceMode::flow_method`], which means `FindLongest` always
    /// honours `traceIndeterminateFlow`.
    pub fn applies_indeterminate_flow(&self) -> bool {
        !matches!(self, TraceMode::FindCircuits | TraceMode::FindCommonAncestors)
            && self.flow_method().map_or(false, |m| m.is_directed())
    }
}

//! Flow solver port
//!
//! Capability interface of the traversal engine. A solver is created per
//! solve from [`GeometricNetwork::new_solver`](super::GeometricNetwork::new_solver),
//! configured with origins, barriers, disabled classes and weights, then
//! asked for one `find_*` result.
//!
//! Result sets are `Option`: `None` means the solver produced no enumeration
//! for that category, which the orchestrator reports when the category was
//! requested.

use crate::shared::models::{
    Eid, ElementBarriers, ElementType, Flag, FlowElements, FlowMethod, NetworkElementRef,
    SelectionSetBarriers, ShortestPathObjFn, WeightSettings,
};
use thiserror::Error;

/// Solver failure
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("No origins set on the solver")]
    NoOrigins,

    #[error("Flag element {} {} is not part of the network", .0.element_type.singular(), .0.eid)]
    UnknownFlag(NetworkElementRef),

    #[error("Solver failure: {0}")]
    Failed(String),
}

pub type SolverResult<T> = Result<T, SolverError>;

/// Junction and edge id sets returned by a solve
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceElements {
    pub junctions: Option<Vec<Eid>>,
    pub edges: Option<Vec<Eid>>,
}

impl TraceElements {
    pub fn get(&self, element_type: ElementType) -> Option<&Vec<Eid>> {
        match element_type {
            ElementType::Junction => self.junctions.as_ref(),
            ElementType::Edge => self.edges.as_ref(),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.as_ref().map_or(0, Vec::len)
    }

    pub fn junction_count(&self) -> usize {
        self.junctions.as_ref().map_or(0, Vec::len)
    }
}

/// Result of `find_accumulation`
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationResult {
    pub elements: TraceElements,
    pub total_cost: f64,
}

/// Result of `find_path` / `find_source`
///
/// `segment_costs[i]` is `None` when segment `i` could not be solved.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub elements: TraceElements,
    pub segment_costs: Vec<Option<f64>>,
}

/// Traversal engine bound to one network
pub trait FlowSolver {
    fn put_edge_origins(&mut self, flags: &[Flag]);

    fn put_junction_origins(&mut self, flags: &[Flag]);

    fn set_element_barriers(
        &mut self,
        element_type: ElementType,
        barriers: &ElementBarriers,
    ) -> SolverResult<()>;

    fn set_selection_set_barriers(&mut self, barriers: &SelectionSetBarriers);

    /// Every element of the class stops traversal
    fn disable_element_class(&mut self, class_id: i32);

    fn set_trace_indeterminate_flow(&mut self, enabled: bool);

    fn set_weights(&mut self, weights: &WeightSettings);

    fn find_accumulation(
        &mut self,
        method: FlowMethod,
        elements: FlowElements,
    ) -> SolverResult<AccumulationResult>;

    fn find_circuits(&mut self, elements: FlowElements) -> SolverResult<TraceElements>;

    fn find_common_ancestors(&mut self, elements: FlowElements) -> SolverResult<TraceElements>;

    fn find_flow_elements(
        &mut self,
        method: FlowMethod,
        elements: FlowElements,
    ) -> SolverResult<TraceElements>;

    fn find_flow_end_elements(
        &mut self,
        method: FlowMethod,
        elements: FlowElements,
    ) -> SolverResult<TraceElements>;

    fn find_flow_unreached_elements(
        &mut self,
        method: FlowMethod,
        elements: FlowElements,
    ) -> SolverResult<TraceElements>;

    /// Paths between consecutive origins, `count` segments
    fn find_path(
        &mut self,
        method: FlowMethod,
        objective: ShortestPathObjFn,
        count: usize,
    ) -> SolverResult<PathResult>;

    /// Path from each origin to its nearest source, `count` segments
    fn find_source(
        &mut self,
        method: FlowMethod,
        objective: ShortestPathObjFn,
        count: usize,
    ) -> SolverResult<PathResult>;
}

//! Longest upstream path from a single junction flag
//!
//! ```text
//!            end₁ ─┐
//!            end₂ ─┼─ upstream ─▶ ... ─▶ origin
//!            end₃ ─┘
//! ```
//!
//! An origin with nothing upstream is its own end and yields no candidate.
//! Every upstream end junction is paired with the origin and solved as a
//! two-stop `MinMax` path. The candidate with the largest first segment cost
//! wins; an earlier candidate keeps the win on ties and unsolvable
//! candidates are skipped.

use super::super::domain::SolvedTrace;
use crate::errors::{GeonetError, Result};
use crate::shared::models::{
    Eid, ElementType, Flag, FlowElements, FlowMethod, NetworkElementRef, ShortestPathObjFn,
};
use crate::shared::ports::{FlowSolver, GeometricNetwork, TraceElements};

pub struct LongestPathFinder<'a, 'n> {
    network: &'n dyn GeometricNetwork,
    solver: &'a mut (dyn FlowSolver + 'n),
}

impl<'a, 'n> LongestPathFinder<'a, 'n> {
    pub fn new(network: &'n dyn GeometricNetwork, solver: &'a mut (dyn FlowSolver + 'n)) -> Self {
        Self { network, solver }
    }

    /// Solve from `origin`; the solver must already carry it as its only origin
    pub fn find(&mut self, origin: &Flag) -> Result<SolvedTrace> {
        let ends = self
            .solver
            .find_flow_end_elements(FlowMethod::Upstream, FlowElements::Junctions)?
            .junctions
            .unwrap_or_default()
            .into_iter()
            .filter(|end| *end != origin.element.eid)
            .collect::<Vec<_>>();
        if ends.is_empty() {
            return Err(GeonetError::NoEndJunctionFound);
        }
        tracing::debug!(origin = origin.element.eid, candidates = ends.len(), "longest_candidates");

        let mut best: Option<(Eid, f64, TraceElements)> = None;
        let mut longest = f64::MIN;
        for end in ends {
            let user_ids = self.network.query_ids(end, ElementType::Junction)?;
            let end_flag = Flag::new(NetworkElementRef::junction(end), user_ids);
            self.solver.put_junction_origins(&[origin.clone(), end_flag]);

            let path = self
                .solver
                .find_path(FlowMethod::Upstream, ShortestPathObjFn::MinMax, 1)?;
            let Some(Some(cost)) = path.segment_costs.first().copied() else {
                continue;
            };
            if cost > longest {
                longest = cost;
                best = Some((end, cost, path.elements));
            }
        }

        let (end, cost, elements) = best.ok_or(GeonetError::NoLongestPathFound)?;
        tracing::info!(end_junction = end, total_cost = cost, "longest_path_found");
        Ok(SolvedTrace {
            elements,
            total_cost: Some(cost),
            segment_costs: None,
        })
    }
}

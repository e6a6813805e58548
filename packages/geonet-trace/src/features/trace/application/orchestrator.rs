//! Trace Orchestrator
//!
//! ```text
//! TraceRequest ─▶ validate ─▶ weights ─▶ flags/barriers ─▶ solver setup
//!                                                             │
//!                     TraceOutcome ◀── materialize ◀── dispatch(mode)
//! ```

use super::longest::LongestPathFinder;
use super::setup::SolverSetup;
use crate::config::LocaleConfig;
use crate::errors::{GeonetError, Result};
use crate::features::flags::{FlagBarrierBuilder, ResolvedInputs};
use crate::features::materialize::ResultMaterializer;
use crate::features::trace::domain::{SolvedTrace, TraceMode, TraceOutcome, TraceRequest};
use crate::features::weights::WeightConfigurator;
use crate::shared::ports::{FlowSolver, GeometricNetwork};
use std::time::Instant;

pub struct TraceOrchestrator<'n> {
    network: &'n dyn GeometricNetwork,
    locale: LocaleConfig,
}

impl<'n> TraceOrchestrator<'n> {
    pub fn new(network: &'n dyn GeometricNetwork, locale: &LocaleConfig) -> Self {
        Self {
            network,
            locale: locale.clone(),
        }
    }

    pub fn solve(&self, request: &TraceRequest) -> Result<TraceOutcome> {
        let started = Instant::now();
        request.validate()?;

        let weights = WeightConfigurator::new(self.network, &self.locale).configure(&request.weights)?;
        let inputs = FlagBarrierBuilder::new(self.network).build(&request.inputs, request.tolerance)?;
        inputs.require_flags()?;

        let mut setup = SolverSetup::from_inputs(&inputs)
            .with_disabled_classes(&request.disabled_classes)
            .with_weights(&weights);
        if request.mode.applies_indeterminate_flow() {
            setup = setup.with_trace_indeterminate_flow(request.trace_indeterminate_flow);
        }
        let mut solver = setup.apply(self.network)?;

        let solved = self.dispatch(solver.as_mut(), request, &inputs)?;

        let features = ResultMaterializer::new(self.network).materialize_trace(
            &solved.elements,
            request.flow_elements,
            request.max_features,
            &request.out_fields,
        )?;

        tracing::info!(
            network = %self.network.name(),
            solver = %request.mode.solver_type(),
            edges = solved.elements.edge_count(),
            junctions = solved.elements.junction_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "trace_solved"
        );

        Ok(TraceOutcome {
            solved,
            features,
            flags_not_found: inputs.flags_not_found,
            barriers_not_found: inputs.barriers_not_found,
        })
    }

    fn dispatch(
        &self,
        solver: &mut (dyn FlowSolver + 'n),
        request: &TraceRequest,
        inputs: &ResolvedInputs,
    ) -> Result<SolvedTrace> {
        let elements = request.flow_elements;
        let edge_flags = inputs.edge_flags.len();
        let junction_flags = inputs.junction_flags.len();
        Ok(match request.mode {
            TraceMode::FindAccumulation { flow_method } => {
                let result = solver.find_accumulation(flow_method, elements)?;
                SolvedTrace {
                    elements: result.elements,
                    total_cost: Some(result.total_cost),
                    segment_costs: None,
                }
            }
            TraceMode::FindCircuits => SolvedTrace::elements(solver.find_circuits(elements)?),
            TraceMode::FindCommonAncestors => SolvedTrace::elements(solver.find_common_ancestors(elements)?),
            TraceMode::FindFlowElements { flow_method } => {
                SolvedTrace::elements(solver.find_flow_elements(flow_method, elements)?)
            }
            TraceMode::FindFlowEndElements { flow_method } => {
                SolvedTrace::elements(solver.find_flow_end_elements(flow_method, elements)?)
            }
            TraceMode::FindFlowUnreachedElements { flow_method } => {
                SolvedTrace::elements(solver.find_flow_unreached_elements(flow_method, elements)?)
            }
            TraceMode::FindPath { flow_method, objective } => {
                // Counted on resolved flags: unsnapped points do not form stops
                let stops = edge_flags.max(junction_flags);
                if stops < 2 {
                    return Err(GeonetError::validation("Edge or junction found < 2!"));
                }
                let path = solver.find_path(flow_method, objective, stops - 1)?;
                SolvedTrace {
                    elements: path.elements,
                    total_cost: None,
                    segment_costs: Some(path.segment_costs),
                }
            }
            TraceMode::FindSource { flow_method, objective } => {
                let path = solver.find_source(flow_method, objective, edge_flags + junction_flags)?;
                SolvedTrace {
                    elements: path.elements,
                    total_cost: None,
                    segment_costs: Some(path.segment_costs),
                }
            }
            TraceMode::FindLongest => {
                let origin = inputs.junction_flags.first().ok_or_else(|| {
                    GeonetError::validation("FindLongest: the flag junction you place on the network must be = 1. No edges.")
                })?;
                LongestPathFinder::new(self.network, solver).find(origin)?
            }
        })
    }
}

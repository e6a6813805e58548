//! Valve Isolation Solver
//!
//! Five passes over the flow solver, each on a freshly configured solver:
//!
//! ```text
//! 1. ends(connected, flags, valves as barriers)        → candidate valves V
//! 2. ends(connected, flags, station class disabled)    → candidate sources S
//! 3. flow(connected, flags, V as selection barrier)    → direct sources D;  S ← S \ D
//! 4. ∀ v ∈ V: ∃ s ∈ S with path(v → s, V \ {v} barred) → has_source / no_source
//! 5. flow(connected, flags, has_source as selection barrier) → result
//! ```

use super::domain::{IsolationJunction, IsolationOutcome, IsolationRequest, ValveClassification};
use crate::errors::{GeonetError, Result};
use crate::features::flags::{FlagBarrierBuilder, ResolvedInputs};
use crate::features::materialize::ResultMaterializer;
use crate::features::trace::SolverSetup;
use crate::shared::models::{
    Eid, ElementBarriers, ElementType, Flag, FlowElements, FlowMethod, NetworkElementRef,
    SelectionSetBarriers, ShortestPathObjFn, UserIds,
};
use crate::shared::ports::GeometricNetwork;
use rustc_hash::FxHashSet;
use std::time::Instant;

pub struct ValveIsolationSolver<'n> {
    network: &'n dyn GeometricNetwork,
}

impl<'n> ValveIsolationSolver<'n> {
    pub fn new(network: &'n dyn GeometricNetwork) -> Self {
        Self { network }
    }

    pub fn solve(&self, request: &IsolationRequest) -> Result<IsolationOutcome> {
        let started = Instant::now();
        request.validate()?;
        for class_id in [request.station_class, request.valve_class] {
            if self.network.feature_class(class_id).is_none() {
                return Err(GeonetError::not_found(format!("Feature class {} not found", class_id)));
            }
        }

        let inputs = FlagBarrierBuilder::new(self.network).build(&request.inputs, request.tolerance)?;
        if !inputs.has_flags() {
            return Err(GeonetError::NoValidFlags {
                flags_not_found: inputs.flags_not_found.clone(),
                barriers_not_found: Vec::new(),
            });
        }

        let valves = self.candidate_valves(&inputs, request.valve_class)?;
        let mut sources = self.candidate_sources(&inputs, request.station_class)?;
        let direct = self.direct_sources(&inputs, &valves, request)?;
        sources.retain(|s| !direct.contains(&s.oid));
        tracing::debug!(
            valves = valves.len(),
            sources = sources.len(),
            direct_sources = direct.len(),
            "isolation_candidates"
        );

        let classification = self.classify(&valves, &sources, request.valve_class)?;

        let closing: SelectionSetBarriers = classification
            .has_source
            .iter()
            .map(|v| (request.valve_class, v.oid))
            .collect();
        let mut solver = SolverSetup::new(&inputs.edge_flags, &inputs.junction_flags)
            .with_selection_barriers(closing)
            .apply(self.network)?;
        let elements = solver.find_flow_elements(FlowMethod::Connected, request.flow_elements)?;

        let materializer = ResultMaterializer::new(self.network);
        let features = materializer.materialize_trace(
            &elements,
            request.flow_elements,
            request.max_features,
            &request.out_fields,
        )?;

        let valves_set = if classification.has_source.is_empty() {
            None
        } else {
            let eids: Vec<Eid> = classification.has_source.iter().map(|v| v.eid).collect();
            materializer
                .materialize(&eids, ElementType::Junction, &request.out_fields)?
                .into_iter()
                .next()
        };

        tracing::info!(
            network = %self.network.name(),
            valves_to_close = classification.has_source.len(),
            valves_without_source = classification.no_source.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "isolation_solved"
        );

        Ok(IsolationOutcome {
            features,
            valves: valves_set,
            classification,
            flags_not_found: inputs.flags_not_found,
        })
    }

    /// Pass 1: valves bounding the flags
    fn candidate_valves(&self, inputs: &ResolvedInputs, valve_class: i32) -> Result<Vec<IsolationJunction>> {
        let all_valves = ElementBarriers::ByFeature {
            class_id: valve_class,
            oids: self.network.all_oids(valve_class)?,
        };
        let mut solver = SolverSetup::new(&inputs.edge_flags, &inputs.junction_flags)
            .with_junction_barriers(all_valves)
            .apply(self.network)?;
        let ends = solver.find_flow_end_elements(FlowMethod::Connected, FlowElements::JunctionsAndEdges)?;
        self.junctions_of_class(ends.junctions.as_deref().unwrap_or_default(), valve_class)
    }

    /// Pass 2: stations reachable from the flags
    fn candidate_sources(&self, inputs: &ResolvedInputs, station_class: i32) -> Result<Vec<IsolationJunction>> {
        let mut solver = SolverSetup::new(&inputs.edge_flags, &inputs.junction_flags)
            .with_disabled_classes(&[station_class])
            .apply(self.network)?;
        let ends = solver.find_flow_end_elements(FlowMethod::Connected, FlowElements::Junctions)?;
        self.junctions_of_class(ends.junctions.as_deref().unwrap_or_default(), station_class)
    }

    /// Pass 3: object ids of stations reachable without crossing a valve
    fn direct_sources(
        &self,
        inputs: &ResolvedInputs,
        valves: &[IsolationJunction],
        request: &IsolationRequest,
    ) -> Result<FxHashSet<i32>> {
        let barriers: SelectionSetBarriers = valves.iter().map(|v| (request.valve_class, v.oid)).collect();
        let mut solver = SolverSetup::new(&inputs.edge_flags, &inputs.junction_flags)
            .with_selection_barriers(barriers)
            .apply(self.network)?;
        let reached = solver.find_flow_elements(FlowMethod::Connected, FlowElements::JunctionsAndEdges)?;
        Ok(self
            .junctions_of_class(reached.junctions.as_deref().unwrap_or_default(), request.station_class)?
            .into_iter()
            .map(|s| s.oid)
            .collect())
    }

    /// Pass 4: a valve must close when some remaining source is reachable
    /// through it with every other candidate valve closed
    pub fn classify(
        &self,
        valves: &[IsolationJunction],
        sources: &[IsolationJunction],
        valve_class: i32,
    ) -> Result<ValveClassification> {
        let mut classification = ValveClassification::default();
        let station_ids = |s: &IsolationJunction| self.network.query_ids(s.eid, ElementType::Junction);

        for valve in valves {
            let others: Vec<i32> = valves.iter().filter(|v| v.oid != valve.oid).map(|v| v.oid).collect();
            let origin = Flag::new(
                NetworkElementRef::junction(valve.eid),
                UserIds {
                    class_id: valve_class,
                    feature_id: valve.oid,
                    sub_id: 0,
                },
            )
            .with_label("Origin");

            let mut found_source = false;
            for source in sources {
                let ids = station_ids(source)?;
                let destination = Flag::new(
                    NetworkElementRef::junction(source.eid),
                    UserIds { sub_id: 0, ..ids },
                )
                .with_label("Destination");
                let stops = [origin.clone(), destination];

                let mut setup = SolverSetup::new(&[], &stops);
                if !others.is_empty() {
                    setup = setup.with_junction_barriers(ElementBarriers::ByFeature {
                        class_id: valve_class,
                        oids: others.clone(),
                    });
                }
                let mut solver = setup.apply(self.network)?;
                let path = solver.find_path(FlowMethod::Connected, ShortestPathObjFn::MinSum, 1)?;
                if path.elements.edge_count() > 0 {
                    found_source = true;
                    break;
                }
            }

            tracing::debug!(valve = valve.oid, has_source = found_source, "valve_tested");
            if found_source {
                classification.has_source.push(*valve);
            } else {
                classification.no_source.push(*valve);
            }
        }
        Ok(classification)
    }

    fn junctions_of_class(&self, eids: &[Eid], class_id: i32) -> Result<Vec<IsolationJunction>> {
        let mut found = Vec::new();
        for &eid in eids {
            let ids = self.network.query_ids(eid, ElementType::Junction)?;
            if ids.class_id == class_id {
                found.push(IsolationJunction { eid, oid: ids.feature_id });
            }
        }
        Ok(found)
    }
}

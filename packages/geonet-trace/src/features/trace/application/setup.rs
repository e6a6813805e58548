//! Solver preparation shared by every trace pass
//!
//! Order matters and is fixed: origins (edges, then junctions), element
//! barriers (edges, then junctions), selection-set barriers, disabled
//! classes, weights, indeterminate flow.

use crate::errors::Result;
use crate::features::flags::ResolvedInputs;
use crate::shared::models::{ElementBarriers, ElementType, Flag, SelectionSetBarriers, WeightSettings};
use crate::shared::ports::{FlowSolver, GeometricNetwork};

#[derive(Debug, Clone, Default)]
pub struct SolverSetup<'a> {
    edge_flags: &'a [Flag],
    junction_flags: &'a [Flag],
    edge_barriers: Option<ElementBarriers>,
    junction_barriers: Option<ElementBarriers>,
    selection_barriers: Option<SelectionSetBarriers>,
    disabled_classes: Vec<i32>,
    weights: Option<&'a WeightSettings>,
    trace_indeterminate_flow: bool,
}

impl<'a> SolverSetup<'a> {
    pub fn new(edge_flags: &'a [Flag], junction_flags: &'a [Flag]) -> Self {
        Self {
            edge_flags,
            junction_flags,
            ..Self::default()
        }
    }

    /// Resolved flags plus element-id barriers
    pub fn from_inputs(inputs: &'a ResolvedInputs) -> Self {
        let mut setup = Self::new(&inputs.edge_flags, &inputs.junction_flags);
        if !inputs.edge_barriers.is_empty() {
            setup.edge_barriers = Some(ElementBarriers::ByEid(inputs.edge_barriers.clone()));
        }
        if !inputs.junction_barriers.is_empty() {
            setup.junction_barriers = Some(ElementBarriers::ByEid(inputs.junction_barriers.clone()));
        }
        setup
    }

    pub fn with_junction_flags(mut self, junction_flags: &'a [Flag]) -> Self {
        self.junction_flags = junction_flags;
        self
    }

    pub fn with_edge_flags(mut self, edge_flags: &'a [Flag]) -> Self {
        self.edge_flags = edge_flags;
        self
    }

    pub fn with_junction_barriers(mut self, barriers: ElementBarriers) -> Self {
        self.junction_barriers = Some(barriers);
        self
    }

    pub fn with_selection_barriers(mut self, barriers: SelectionSetBarriers) -> Self {
        self.selection_barriers = Some(barriers);
        self
    }

    pub fn with_disabled_classes(mut self, classes: &[i32]) -> Self {
        self.disabled_classes.extend_from_slice(classes);
        self
    }

    pub fn with_weights(mut self, weights: &'a WeightSettings) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_trace_indeterminate_flow(mut self, enabled: bool) -> Self {
        self.trace_indeterminate_flow = enabled;
        self
    }

    /// Fresh solver on `network` configured with this setup
    pub fn apply<'n>(&self, network: &'n dyn GeometricNetwork) -> Result<Box<dyn FlowSolver + 'n>> {
        let mut solver = network.new_solver();

        if !self.edge_flags.is_empty() {
            solver.put_edge_origins(self.edge_flags);
        }
        if !self.junction_flags.is_empty() {
            solver.put_junction_origins(self.junction_flags);
        }

        if let Some(barriers) = self.edge_barriers.as_ref().filter(|b| !b.is_empty()) {
            solver.set_element_barriers(ElementType::Edge, barriers)?;
        }
        if let Some(barriers) = self.junction_barriers.as_ref().filter(|b| !b.is_empty()) {
            solver.set_element_barriers(ElementType::Junction, barriers)?;
        }
        if let Some(barriers) = self.selection_barriers.as_ref().filter(|b| !b.is_empty()) {
            solver.set_selection_set_barriers(barriers);
        }

        for class_id in &self.disabled_classes {
            solver.disable_element_class(*class_id);
        }

        if let Some(weights) = self.weights.filter(|w| !w.is_empty()) {
            solver.set_weights(weights);
        }

        if self.trace_indeterminate_flow {
            solver.set_trace_indeterminate_flow(true);
        }
        Ok(solver)
    }
}

//! Flag/Barrier Builder

use crate::errors::Result;
use crate::features::element_locator::ElementLocator;
use crate::features::flags::domain::{FlagInputs, ResolvedInputs};
use crate::shared::models::{ElementType, Flag, NetworkElementRef, Point};
use crate::shared::ports::GeometricNetwork;

pub struct FlagBarrierBuilder<'n> {
    network: &'n dyn GeometricNetwork,
    locator: ElementLocator<'n>,
}

impl<'n> FlagBarrierBuilder<'n> {
    pub fn new(network: &'n dyn GeometricNetwork) -> Self {
        Self {
            network,
            locator: ElementLocator::new(network),
        }
    }

    /// Locate every input independently
    ///
    /// Unresolved points are recorded, never fatal. Callers decide whether
    /// an empty flag set is an error (see [`ResolvedInputs::require_flags`]).
    pub fn build(&self, inputs: &FlagInputs, tolerance: f64) -> Result<ResolvedInputs> {
        let mut resolved = ResolvedInputs::default();

        for point in &inputs.edge_flags {
            match self.resolve_flag(point, tolerance, ElementType::Edge)? {
                Some(flag) => resolved.edge_flags.push(flag),
                None => resolved.flags_not_found.push(*point),
            }
        }
        for point in &inputs.junction_flags {
            match self.resolve_flag(point, tolerance, ElementType::Junction)? {
                Some(flag) => resolved.junction_flags.push(flag),
                None => resolved.flags_not_found.push(*point),
            }
        }
        for point in &inputs.edge_barriers {
            match self.locator.locate(point, tolerance, ElementType::Edge)? {
                Some(eid) => resolved.edge_barriers.push(eid),
                None => resolved.barriers_not_found.push(*point),
            }
        }
        for point in &inputs.junction_barriers {
            match self.locator.locate(point, tolerance, ElementType::Junction)? {
                Some(eid) => resolved.junction_barriers.push(eid),
                None => resolved.barriers_not_found.push(*point),
            }
        }

        if !resolved.flags_not_found.is_empty() || !resolved.barriers_not_found.is_empty() {
            tracing::warn!(
                flags_not_found = resolved.flags_not_found.len(),
                barriers_not_found = resolved.barriers_not_found.len(),
                "inputs_not_located"
            );
        }
        tracing::debug!(
            edge_flags = resolved.edge_flags.len(),
            junction_flags = resolved.junction_flags.len(),
            edge_barriers = resolved.edge_barriers.len(),
            junction_barriers = resolved.junction_barriers.len(),
            "flags_and_barriers_built"
        );
        Ok(resolved)
    }

    /// Locate `point` and attach its owning feature ids
    pub fn resolve_flag(
        &self,
        point: &Point<f64>,
        tolerance: f64,
        element_type: ElementType,
    ) -> Result<Option<Flag>> {
        let Some(eid) = self.locator.locate(point, tolerance, element_type)? else {
            return Ok(None);
        };
        let user_ids = self.network.query_ids(eid, element_type)?;
        Ok(Some(Flag::new(NetworkElementRef::new(element_type, eid), user_ids)))
    }
}

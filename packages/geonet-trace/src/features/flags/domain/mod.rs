//! Flag and barrier inputs and their resolution

use crate::errors::{GeonetError, Result};
use crate::shared::models::{Eid, Flag, Point};

/// Points supplied by the caller, in request order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagInputs {
    pub edge_flags: Vec<Point<f64>>,
    pub junction_flags: Vec<Point<f64>>,
    pub edge_barriers: Vec<Point<f64>>,
    pub junction_barriers: Vec<Point<f64>>,
}

impl FlagInputs {
    pub fn flag_count(&self) -> usize {
        self.edge_flags.len() + self.junction_flags.len()
    }
}

/// Solver inputs plus the points that failed to snap
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedInputs {
    pub edge_flags: Vec<Flag>,
    pub junction_flags: Vec<Flag>,
    pub edge_barriers: Vec<Eid>,
    pub junction_barriers: Vec<Eid>,
    pub flags_not_found: Vec<Point<f64>>,
    pub barriers_not_found: Vec<Point<f64>>,
}

impl ResolvedInputs {
    pub fn has_flags(&self) -> bool {
        !self.edge_flags.is_empty() || !self.junction_flags.is_empty()
    }

    /// Fail with the not-found diagnostics when no flag resolved
    pub fn require_flags(&self) -> Result<()> {
        if self.has_flags() {
            return Ok(());
        }
        Err(GeonetError::NoValidFlags {
            flags_not_found: self.flags_not_found.clone(),
            barriers_not_found: self.barriers_not_found.clone(),
        })
    }
}

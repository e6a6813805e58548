//! Stream walks over edge topology
//!
//! Downstream leaves a junction along edges that start there; upstream
//! enters it along edges that end there. Both walks are bounded by the
//! network edge count.

use crate::errors::{GeonetError, Result};
use crate::shared::models::{Eid, ElementType};
use crate::shared::ports::{AdjacentEdge, GeometricNetwork};

const DOWNSTREAM_LEVEL_ERROR: &str = "Error in find of downstream. Check level in geometric network";
const DOWNSTREAM_LOOP_ERROR: &str = "Error in find of downstream. Check geometric network";
const UPSTREAM_LEVEL_ERROR: &str = "Error in find of upstream. Check level in geometric network";
const UPSTREAM_LOOP_ERROR: &str = "Error in find of upstream. Check geometric network";

pub struct StreamWalker<'a> {
    network: &'a dyn GeometricNetwork,
    field_level: &'a str,
}

impl<'a> StreamWalker<'a> {
    pub fn new(network: &'a dyn GeometricNetwork, field_level: &'a str) -> Self {
        Self { network, field_level }
    }

    /// Stream order of an edge
    pub fn level(&self, edge: Eid, context: &str) -> Result<i64> {
        let ids = self.network.query_ids(edge, ElementType::Edge)?;
        self.network
            .attribute(ids.class_id, ids.feature_id, self.field_level)
            .ok()
            .and_then(|value| value.as_i64())
            .ok_or_else(|| GeonetError::stream(context))
    }

    /// Follow the stream down while the order does not rise above the start edge's
    ///
    /// Stops at an outlet or where every outgoing edge has a higher order.
    /// Several qualifying outgoing edges make the stream ambiguous.
    pub fn downstream_same_order(&self, start: Eid) -> Result<Vec<Eid>> {
        let start_level = self.level(start, DOWNSTREAM_LEVEL_ERROR)?;
        let mut edges = vec![start];
        let mut current = start;
        let limit = self.network.edge_count();

        loop {
            let (_, to) = self.network.edge_junctions(current)?;
            let outgoing: Vec<AdjacentEdge> = self
                .network
                .adjacent_edges(to)?
                .into_iter()
                .filter(|adj| !adj.reverse_orientation)
                .collect();
            if outgoing.is_empty() {
                break;
            }

            let mut qualifying = Vec::new();
            for adj in &outgoing {
                if self.level(adj.edge, DOWNSTREAM_LEVEL_ERROR)? <= start_level {
                    qualifying.push(adj.edge);
                }
            }
            match qualifying.as_slice() {
                [] => break,
                [next] => {
                    current = *next;
                    edges.push(current);
                }
                _ => return Err(GeonetError::stream(DOWNSTREAM_LEVEL_ERROR)),
            }

            if edges.len() > limit {
                return Err(GeonetError::stream(DOWNSTREAM_LOOP_ERROR));
            }
        }
        tracing::debug!(start, edges = edges.len(), "downstream_same_order_walk");
        Ok(edges)
    }

    /// Walk up from `start`
    ///
    /// With `same_order` the incoming edge of equal order is followed and the
    /// walk ends quietly when there is none. Otherwise the incoming edge with
    /// the highest order wins, first one on ties. Headwaters end the walk.
    pub fn upstream(&self, start: Eid, same_order: bool) -> Result<Vec<Eid>> {
        let mut edges = vec![start];
        let mut current = start;
        let limit = self.network.edge_count();

        loop {
            let (from, _) = self.network.edge_junctions(current)?;
            let adjacent = self.network.adjacent_edges(from)?;
            if adjacent.len() == 1 {
                break;
            }
            let incoming: Vec<Eid> = adjacent
                .iter()
                .filter(|adj| adj.reverse_orientation)
                .map(|adj| adj.edge)
                .collect();
            if incoming.is_empty() {
                break;
            }

            let next = if same_order {
                let current_level = self.level(current, UPSTREAM_LEVEL_ERROR)?;
                let mut found = None;
                for &edge in &incoming {
                    if self.level(edge, UPSTREAM_LEVEL_ERROR)? == current_level {
                        found = Some(edge);
                        break;
                    }
                }
                match found {
                    Some(edge) => edge,
                    None => break,
                }
            } else {
                let mut best: Option<(Eid, i64)> = None;
                for &edge in &incoming {
                    let level = self.level(edge, UPSTREAM_LEVEL_ERROR)?;
                    if best.map_or(true, |(_, top)| level > top) {
                        best = Some((edge, level));
                    }
                }
                best.map(|(edge, _)| edge)
                    .ok_or_else(|| GeonetError::stream(UPSTREAM_LEVEL_ERROR))?
            };

            edges.push(next);
            current = next;
            if edges.len() - 1 > limit {
                return Err(GeonetError::stream(UPSTREAM_LOOP_ERROR));
            }
        }
        tracing::debug!(start, same_order, edges = edges.len(), "upstream_walk");
        Ok(edges)
    }
}

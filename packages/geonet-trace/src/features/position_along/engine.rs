//! Position-Along Engine
//!
//! ```text
//! flag ──snap──▶ edge ──walk──▶ [edges] ──union──▶ measured polyline
//!                                                     │ project flag → m₀
//!                                                     ▼
//!                               subcurve(m₀, m₀ + |length|) ──offset──▶ geometry
//! ```

use super::domain::{PosAlongOutcome, PosAlongRequest, DISTANCE_EXCEEDS_NETWORK};
use super::stream::StreamWalker;
use crate::errors::{GeonetError, Result};
use crate::features::flags::FlagBarrierBuilder;
use crate::features::trace::SolverSetup;
use crate::shared::models::{Eid, ElementType, FlowElements, FlowMethod, Geometry, LineString, Point};
use crate::shared::ports::GeometricNetwork;
use crate::shared::utils::offset::offset_polyline;
use crate::shared::utils::MeasuredPolyline;

pub struct PositionAlongEngine<'n> {
    network: &'n dyn GeometricNetwork,
}

impl<'n> PositionAlongEngine<'n> {
    pub fn new(network: &'n dyn GeometricNetwork) -> Self {
        Self { network }
    }

    pub fn solve(&self, request: &PosAlongRequest) -> Result<PosAlongOutcome> {
        request.validate()?;
        let point = request.edge_flags[0];

        let Some(flag) = FlagBarrierBuilder::new(self.network).resolve_flag(&point, request.tolerance, ElementType::Edge)?
        else {
            tracing::warn!(x = point.x(), y = point.y(), "pos_along_flag_not_found");
            return Ok(PosAlongOutcome::FlagNotFound(point));
        };
        let start = flag.element.eid;

        let edges = if request.is_downstream() {
            if request.same_order {
                StreamWalker::new(self.network, request.level_field()?).downstream_same_order(start)?
            } else {
                let flags = [flag];
                let mut solver = SolverSetup::new(&flags, &[]).apply(self.network)?;
                let traced = solver.find_flow_elements(FlowMethod::Downstream, FlowElements::Edges)?;
                match traced.edges {
                    Some(edges) if !edges.is_empty() => edges,
                    _ => return Err(GeonetError::not_found("Result not found!")),
                }
            }
        } else {
            StreamWalker::new(self.network, request.level_field()?).upstream(start, request.same_order)?
        };

        let (geometry, message) = self.measure_along(&edges, request.length, point, request.offset)?;
        tracing::info!(
            start_edge = start,
            walked_edges = edges.len(),
            length = request.length,
            exceeded = message.is_some(),
            "pos_along_solved"
        );
        Ok(PosAlongOutcome::Located { geometry, message })
    }

    /// Geometry `|length|` along the union of `edges` from the flag's projection
    ///
    /// Negative lengths measure the reversed union. An empty subcurve yields
    /// the flag point itself, never offset.
    pub fn measure_along(
        &self,
        edges: &[Eid],
        length: f64,
        point: Point<f64>,
        offset: Option<f64>,
    ) -> Result<(Geometry, Option<String>)> {
        let mut lines: Vec<LineString<f64>> = Vec::new();
        for &edge in edges {
            if let Geometry::Polyline(parts) = self.network.element_geometry(edge, ElementType::Edge)? {
                lines.extend(parts.0);
            }
        }

        let mut polyline = MeasuredPolyline::union(lines);
        if length < 0.0 {
            polyline = polyline.reversed();
        }

        let Some(projection) = polyline.project(point.0) else {
            return Ok((Geometry::Point(point), None));
        };
        let target = projection.m + length.abs();
        let subcurve = polyline.subcurve(projection.m, target);
        if subcurve.0.is_empty() {
            return Ok((Geometry::Point(point), None));
        }

        let message = (polyline.m_max() < target).then(|| DISTANCE_EXCEEDS_NETWORK.to_string());
        Ok((Geometry::Polyline(offset_polyline(&subcurve, offset)), message))
    }
}

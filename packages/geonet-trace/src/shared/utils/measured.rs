//! Measured polylines
//!
//! A [`MeasuredPolyline`] is the union of edge geometries stitched into as
//! few parts as possible, with an M value on every vertex equal to the
//! distance travelled from the start of the first part. Parts are measured
//! continuously: part `n + 1` starts at the M where part `n` ended.

use geo::{
    Closest, ClosestPoint, Coord, EuclideanDistance, EuclideanLength, Line, LineInterpolatePoint,
    LineLocatePoint, LineString, MultiLineString, Point,
};

/// Coordinates closer than this are treated as the same vertex when stitching
const STITCH_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
struct MVertex {
    coord: Coord<f64>,
    m: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredPolyline {
    parts: Vec<Vec<MVertex>>,
}

/// Closest location on a measured polyline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredProjection {
    pub coord: Coord<f64>,
    pub m: f64,
    pub distance: f64,
}

impl MeasuredPolyline {
    /// Union `lines` end-to-start in digitized direction, then measure
    pub fn union(lines: Vec<LineString<f64>>) -> Self {
        Self::from_parts(stitch(lines))
    }

    pub fn from_parts(parts: Vec<LineString<f64>>) -> Self {
        let mut measured = Vec::with_capacity(parts.len());
        let mut m = 0.0;
        for part in parts.into_iter().filter(|p| p.0.len() >= 2) {
            let mut vertices = Vec::with_capacity(part.0.len());
            let mut previous: Option<Coord<f64>> = None;
            for coord in part.0 {
                if let Some(prev) = previous {
                    m += Line::new(prev, coord).euclidean_length();
                }
                vertices.push(MVertex { coord, m });
                previous = Some(coord);
            }
            measured.push(vertices);
        }
        Self { parts: measured }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Largest M, i.e. the total length
    pub fn m_max(&self) -> f64 {
        self.parts
            .last()
            .and_then(|part| part.last())
            .map_or(0.0, |v| v.m)
    }

    /// Same geometry walked the other way, re-measured from the new start
    pub fn reversed(&self) -> Self {
        let parts = self
            .parts
            .iter()
            .rev()
            .map(|part| LineString::new(part.iter().rev().map(|v| v.coord).collect()))
            .collect();
        Self::from_parts(parts)
    }

    pub fn to_multi_line_string(&self) -> MultiLineString<f64> {
        MultiLineString::new(
            self.parts
                .iter()
                .map(|part| LineString::new(part.iter().map(|v| v.coord).collect()))
                .collect(),
        )
    }

    /// Closest location to `p`; the first segment wins on ties
    pub fn project(&self, p: Coord<f64>) -> Option<MeasuredProjection> {
        let mut best: Option<MeasuredProjection> = None;
        for part in &self.parts {
            for pair in part.windows(2).filter(|pair| pair[1].m > pair[0].m) {
                let segment = Line::new(pair[0].coord, pair[1].coord);
                let target = Point::from(p);
                let Some(closest) = closest_point(segment.closest_point(&target)) else {
                    continue;
                };
                let t = segment.line_locate_point(&closest).unwrap_or(0.0);
                let candidate = MeasuredProjection {
                    coord: closest.0,
                    m: pair[0].m + t * (pair[1].m - pair[0].m),
                    distance: closest.euclidean_distance(&target),
                };
                if best.map_or(true, |b| candidate.distance < b.distance) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// Portion of the polyline between two measures
    ///
    /// Measures outside `[0, m_max]` are clamped. The result is empty when
    /// the clamped interval has no length.
    pub fn subcurve(&self, from_m: f64, to_m: f64) -> MultiLineString<f64> {
        let (lo, hi) = if from_m <= to_m { (from_m, to_m) } else { (to_m, from_m) };
        let mut out = Vec::new();
        if hi <= lo {
            return MultiLineString::new(out);
        }
        for part in &self.parts {
            let mut current: Vec<Coord<f64>> = Vec::new();
            for pair in part.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if b.m <= lo || a.m >= hi || b.m == a.m {
                    continue;
                }
                let start = interpolate(a, b, lo.max(a.m));
                let end = interpolate(a, b, hi.min(b.m));
                if current
                    .last()
                    .map_or(true, |last| !same(*last, start))
                {
                    if current.len() >= 2 {
                        out.push(LineString::new(std::mem::take(&mut current)));
                    }
                    current.clear();
                    current.push(start);
                }
                current.push(end);
            }
            if current.len() >= 2 {
                out.push(LineString::new(current));
            }
        }
        MultiLineString::new(out)
    }
}

fn interpolate(a: MVertex, b: MVertex, m: f64) -> Coord<f64> {
    let t = if b.m == a.m { 0.0 } else { (m - a.m) / (b.m - a.m) };
    Line::new(a.coord, b.coord)
        .line_interpolate_point(t)
        .map_or(a.coord, |p| p.0)
}

fn same(a: Coord<f64>, b: Coord<f64>) -> bool {
    Point::from(a).euclidean_distance(&Point::from(b)) <= STITCH_EPSILON
}

/// Point of a `geo` closest-point answer, `None` when indeterminate
pub fn closest_point(closest: Closest<f64>) -> Option<Point<f64>> {
    match closest {
        Closest::Intersection(p) | Closest::SinglePoint(p) => Some(p),
        Closest::Indeterminate => None,
    }
}

/// Join lines whose end meets another line's start
///
/// Chains grow forward then backward from the earliest unused line, so the
/// first line keeps its place in the first part.
pub fn stitch(lines: Vec<LineString<f64>>) -> Vec<LineString<f64>> {
    let mut pending: Vec<Vec<Coord<f64>>> = lines
        .into_iter()
        .map(|l| l.0)
        .filter(|coords| coords.len() >= 2)
        .collect();
    let mut chains = Vec::new();

    while !pending.is_empty() {
        let mut chain = pending.remove(0);
        loop {
            let tail = chain[chain.len() - 1];
            if let Some(i) = pending.iter().position(|l| same(l[0], tail)) {
                let next = pending.remove(i);
                chain.extend_from_slice(&next[1..]);
                continue;
            }
            let head = chain[0];
            if let Some(i) = pending.iter().position(|l| same(l[l.len() - 1], head)) {
                let mut prev = pending.remove(i);
                prev.extend_from_slice(&chain[1..]);
                chain = prev;
                continue;
            }
            break;
        }
        chains.push(LineString::new(chain));
    }
    chains
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, line_string};

    fn l_shape() -> MeasuredPolyline {
        MeasuredPolyline::union(vec![
            line_string![(x: 10.0, y: 0.0), (x: 10.0, y: 10.0)],
            line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)],
        ])
    }

    #[test]
    fn test_union_stitches_into_one_part() {
        let polyline = l_shape();
        assert_eq!(polyline.to_multi_line_string().0.len(), 1);
        assert_eq!(polyline.m_max(), 20.0);
        assert_eq!(
            polyline.to_multi_line_string().0[0],
            line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0)]
        );
    }

    #[test]
    fn test_projection_measure() {
        let proj = l_shape().project(coord! { x: 12.0, y: 5.0 }).unwrap();
        assert_eq!(proj.m, 15.0);
        assert_eq!(proj.distance, 2.0);
    }

    #[test]
    fn test_subcurve_across_vertex() {
        let sub = l_shape().subcurve(5.0, 15.0);
        assert_eq!(sub.0.len(), 1);
        assert_eq!(
            sub.0[0],
            line_string![(x: 5.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 5.0)]
        );
    }

    #[test]
    fn test_subcurve_clamped_and_empty() {
        let polyline = l_shape();
        let clamped = polyline.subcurve(18.0, 40.0);
        assert_eq!(clamped.0[0], line_string![(x: 10.0, y: 8.0), (x: 10.0, y: 10.0)]);
        assert!(polyline.subcurve(20.0, 30.0).0.is_empty());
    }

    #[test]
    fn test_reversed_remeasures() {
        let reversed = l_shape().reversed();
        assert_eq!(reversed.m_max(), 20.0);
        let proj = reversed.project(coord! { x: 10.0, y: 10.0 }).unwrap();
        assert_eq!(proj.m, 0.0);
    }

    #[test]
    fn test_disjoint_lines_stay_separate_parts() {
        let parts = stitch(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 5.0, y: 5.0), (x: 6.0, y: 5.0)],
        ]);
        assert_eq!(parts.len(), 2);
    }
}

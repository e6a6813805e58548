//! Perpendicular offsets
//!
//! Positive offsets go to the right of the walking direction, negative to
//! the left. A missing, NaN or zero offset leaves the geometry unchanged.

use geo::{Coord, EuclideanLength, Line, LineString, MultiLineString};

/// Offset distance that actually moves geometry
pub fn effective_offset(offset: Option<f64>) -> Option<f64> {
    offset.filter(|o| !o.is_nan() && *o != 0.0)
}

/// Parallel copy of every part, vertices moved along their miter direction
pub fn offset_polyline(lines: &MultiLineString<f64>, offset: Option<f64>) -> MultiLineString<f64> {
    match effective_offset(offset) {
        None => lines.clone(),
        Some(d) => MultiLineString::new(lines.0.iter().map(|l| offset_line_string(l, d)).collect()),
    }
}

fn offset_line_string(line: &LineString<f64>, d: f64) -> LineString<f64> {
    let coords = &line.0;
    let normals: Vec<Option<Coord<f64>>> = coords
        .windows(2)
        .map(|w| right_normal(w[0], w[1]))
        .collect();

    let shifted = (0..coords.len())
        .map(|i| {
            let before = if i > 0 { normals.get(i - 1).copied().flatten() } else { None };
            let after = normals.get(i).copied().flatten();
            let direction = match (before, after) {
                (Some(n1), Some(n2)) => miter(n1, n2),
                (Some(n), None) | (None, Some(n)) => n,
                (None, None) => Coord { x: 0.0, y: 0.0 },
            };
            Coord {
                x: coords[i].x + direction.x * d,
                y: coords[i].y + direction.y * d,
            }
        })
        .collect();
    LineString::new(shifted)
}

/// Unit normal pointing to the right of the direction `a -> b`
pub fn right_normal(a: Coord<f64>, b: Coord<f64>) -> Option<Coord<f64>> {
    let segment = Line::new(a, b);
    let len = segment.euclidean_length();
    if len == 0.0 {
        return None;
    }
    Some(Coord {
        x: segment.dy() / len,
        y: -segment.dx() / len,
    })
}

/// Miter vector for unit normals `n1`, `n2`; scaled so the offset lines meet
fn miter(n1: Coord<f64>, n2: Coord<f64>) -> Coord<f64> {
    let denom = 1.0 + n1.x * n2.x + n1.y * n2.y;
    if denom < 1e-9 {
        return n1;
    }
    Coord {
        x: (n1.x + n2.x) / denom,
        y: (n1.y + n2.y) / denom,
    }
}

//! Position-Along Engine
//!
//! Computes the point or polyline lying a signed distance along the stream
//! from an edge flag. Positive lengths walk downstream, negative ones
//! upstream following stream order (`fieldLevel`). Edges are expected to be
//! digitized in the flow direction.

pub mod domain;
pub mod engine;
pub mod stream;

pub use domain::{PosAlongOutcome, PosAlongRequest, DISTANCE_EXCEEDS_NETWORK};
pub use engine::PositionAlongEngine;
pub use stream::StreamWalker;

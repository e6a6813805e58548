//! Geometry utilities

pub mod measured;
pub mod offset;

pub use measured::{closest_point, MeasuredPolyline, MeasuredProjection};

//! Flag/Barrier Builder
//!
//! Converts point lists into resolved flags and barrier element ids,
//! keeping the points that failed to snap as diagnostics.

pub mod application;
pub mod domain;

pub use application::FlagBarrierBuilder;
pub use domain::{FlagInputs, ResolvedInputs};

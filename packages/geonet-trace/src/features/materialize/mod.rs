//! Result Materializer
//!
//! Converts solver element-id sets into per-class feature sets:
//!
//! ```text
//! eids ──query_ids──▶ (class, oid) ──group──▶ class₁: [oid…]  ──query──▶ FeatureSet₁
//!                                              class₂: [oid…]  ──query──▶ FeatureSet₂
//! ```
//!
//! Classes keep first-seen order and an oid appears once per class, so
//! complex features backed by several elements are returned once.

pub mod domain;
pub mod materializer;

pub use domain::{MaterializedResult, OutFields};
pub use materializer::ResultMaterializer;

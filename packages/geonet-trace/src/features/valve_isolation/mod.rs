//! Valve Isolation Solver
//!
//! Finds the minimal set of valves to close so that no supply station
//! feeds the flagged location. Valves whose every path to a source is
//! already cut by another candidate valve are not reported.

pub mod domain;
pub mod solver;

pub use domain::{IsolationJunction, IsolationOutcome, IsolationRequest, ValveClassification};
pub use solver::ValveIsolationSolver;

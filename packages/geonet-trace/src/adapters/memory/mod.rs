//! In-memory provider
//!
//! Reference implementation of the provider and solver ports, backed by a
//! petgraph topology and rstar spatial indexes. Used by the CLI, the tests
//! and the benchmarks.

pub mod cursor;
pub mod fixture;
pub mod network;
pub mod solver;

pub use fixture::{FixtureError, FixtureResult, MapFixture, NetworkFixture};
pub use network::{FlowDirection, InMemoryNetwork, JunctionRole, NetworkBuilder, SNAP_EPSILON};
pub use solver::InMemoryFlowSolver;

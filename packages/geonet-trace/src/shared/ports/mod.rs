//! Ports to external collaborators

pub mod cursor;
pub mod network;
pub mod solver;

pub use cursor::{FeatureCursor, ScopedCursor};
pub use network::{AdjacentEdge, GeometricNetwork, NetworkError, NetworkResult};
pub use solver::{AccumulationResult, FlowSolver, PathResult, SolverError, SolverResult, TraceElements};

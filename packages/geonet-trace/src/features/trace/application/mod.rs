pub mod longest;
pub mod orchestrator;
pub mod setup;

pub use longest::LongestPathFinder;
pub use orchestrator::TraceOrchestrator;
pub use setup::SolverSetup;

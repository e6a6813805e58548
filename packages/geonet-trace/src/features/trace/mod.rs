//! Trace Orchestrator
//!
//! Runs one of nine solver modes over resolved flags and barriers and
//! materializes the traced elements:
//!
//! | mode                        | flow method | extra output         |
//! |-----------------------------|-------------|----------------------|
//! | FindAccumulation            | required    | `totalCost`          |
//! | FindCircuits                | ignored     |                      |
//! | FindCommonAncestors         | ignored     |                      |
//! | FindFlowElements            | required    |                      |
//! | FindFlowEndElements         | required    |                      |
//! | FindFlowUnreachedElements   | required    |                      |
//! | FindPath                    | required    | `segmentCosts`       |
//! | FindSource                  | required    | `segmentCosts`       |
//! | FindLongest                 | upstream    | `totalCost`          |

pub mod application;
pub mod domain;

pub use application::{SolverSetup, TraceOrchestrator};
pub use domain::{SolvedTrace, TraceMode, TraceOutcome, TraceRequest};

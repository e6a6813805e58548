//! Trace domain: modes, requests and outcomes

pub mod mode;
pub mod outcome;
pub mod request;

pub use mode::TraceMode;
pub use outcome::{SolvedTrace, TraceOutcome};
pub use request::TraceRequest;

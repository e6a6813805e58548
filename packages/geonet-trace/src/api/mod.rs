//! Service API
//!
//! JSON operation surface of the tracing service, independent of any
//! transport. A host (HTTP server, CLI, bindings) forwards the operation
//! name, the network id and the operation input, and writes back the
//! returned JSON.

pub mod help;
pub mod params;
pub mod service;

pub use params::OperationInput;
pub use service::GeometricNetworkService;

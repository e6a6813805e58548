//! Feature modules
//!
//! Each feature follows a domain/application split: domain types carry the
//! request and outcome semantics, application code drives the network and
//! solver ports.

pub mod element_locator;
pub mod flags;
pub mod materialize;
pub mod network_info;
pub mod position_along;
pub mod trace;
pub mod valve_isolation;
pub mod weights;

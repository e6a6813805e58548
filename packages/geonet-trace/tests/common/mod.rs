//! Common test utilities for geonet-trace
//!
//! Shared water network fixture plus request and response helpers for the
//! integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;

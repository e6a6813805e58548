//! Shared models, ports and utilities used by every feature slice

#[macro_use]
pub mod macros;

pub mod models;
pub mod ports;
pub mod utils;

//! Provider adapters

pub mod memory;

//! Weight application layer

pub mod configurator;
pub mod range_parser;

pub use configurator::WeightConfigurator;
pub use range_parser::{bit_width, RangeParser};

//! Weight & Filter Configurator
//!
//! Resolves named network weights and parses range-filter expressions into
//! typed bounds:
//!
//! - junction weight, from-to / to-from edge weights
//! - junction filter: one weight, ranges, not-operator
//! - edge filter: from-to and to-from weights (paired, same type), ranges,
//!   not-operator
//!
//! Range lists use `,` between ranges when the decimal separator is `.`,
//! and `;` otherwise.

pub mod application;
pub mod domain;

pub use application::{RangeParser, WeightConfigurator};
pub use domain::{RangeError, WeightError, WeightRequest};

//! Weight & filter domain: request shape and errors

use crate::shared::models::WeightType;
use thiserror::Error;

/// Why a filter range list was rejected
///
/// Every message names the whole input, matching what the caller sent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// Token with more than one `-`
    #[error("{input} not valid")]
    Malformed { input: String, token: String },

    /// Value that does not parse as the weight's declared type
    #[error("{input} not valid ('{token}' is not a {weight_type} value)")]
    Unparsable {
        input: String,
        token: String,
        weight_type: WeightType,
    },

    #[error("{input} not valid (from > to)")]
    FromGreaterThanTo { input: String, token: String },

    /// Bitgate value wider than the gate
    #[error("{input} not valid (BitGateSize)")]
    BitGateSize {
        input: String,
        value: i32,
        bits: u32,
        size: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    InvalidRange(#[from] RangeError),

    #[error("Different weight type (EdgeFilterWeight)!")]
    TypeMismatch {
        from_to: WeightType,
        to_from: WeightType,
    },

    #[error("Set fromToEdgeFilterWeight and toFromEdgeFilterWeight!")]
    UnpairedEdgeFilter,
}

/// Weight names and filter expressions of one trace request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightRequest {
    pub junction_weight: Option<String>,
    pub from_to_edge_weight: Option<String>,
    pub to_from_edge_weight: Option<String>,
    pub junction_filter_weight: Option<String>,
    pub junction_filter_ranges: Option<String>,
    pub junction_filter_not_operator: bool,
    pub from_to_edge_filter_weight: Option<String>,
    pub to_from_edge_filter_weight: Option<String>,
    pub edge_filter_ranges: Option<String>,
    pub edge_filter_not_operator: bool,
}

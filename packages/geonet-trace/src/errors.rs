//! Error types for geonet-trace
//!
//! Provides unified error handling across the crate. Every operation entry
//! point converts a [`GeonetError`] into the structured error object
//! `{"hasError": true, "errorDescription": "..."}` instead of propagating it.

use crate::config::ConfigError;
use crate::features::weights::WeightError;
use crate::shared::models::{points_to_json, ElementType, Point};
use crate::shared::ports::{NetworkError, SolverError};
use serde_json::{json, Value};
use thiserror::Error;

/// Main error type for geonet-trace operations
#[derive(Debug, Error)]
pub enum GeonetError {
    /// Malformed or missing request parameter, rejected before solving
    #[error("{0}")]
    Validation(String),

    /// No flag resolved to a network element
    #[error("No input valid flags found")]
    NoValidFlags {
        flags_not_found: Vec<Point<f64>>,
        barriers_not_found: Vec<Point<f64>>,
    },

    /// Traced set larger than the requested feature cap
    #[error("{count} features were traced which exceeds the limit of {limit}")]
    TraceLimitExceeded { count: usize, limit: usize },

    /// Solver returned no enumeration for a requested category
    #[error("No traced {} found", .0.plural())]
    NoTracedElementsFound(ElementType),

    /// Stream walk for position-along could not continue
    #[error("{0}")]
    StreamTraversal(String),

    #[error("Junction end not found!")]
    NoEndJunctionFound,

    #[error("EID longest not found!")]
    NoLongestPathFound,

    /// Unknown network, layer or resource
    #[error("{0}")]
    NotFound(String),

    /// Operation switched off in the service capabilities
    #[error("Operation '{0}' is not enabled on this service")]
    CapabilityDisabled(String),

    #[error(transparent)]
    Weight(#[from] WeightError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GeonetError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        GeonetError::Validation(msg.into())
    }

    /// Create a stream traversal error
    pub fn stream(msg: impl Into<String>) -> Self {
        GeonetError::StreamTraversal(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        GeonetError::NotFound(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, GeonetError::Validation(_) | GeonetError::Weight(_))
    }

    /// Structured error object returned by operations
    pub fn to_error_json(&self) -> Value {
        let mut body = json!({
            "errorDescription": self.to_string(),
            "hasError": true,
        });
        if let GeonetError::NoValidFlags {
            flags_not_found,
            barriers_not_found,
        } = self
        {
            if !flags_not_found.is_empty() {
                body["flagsNotFound"] = points_to_json(flags_not_found);
            }
            if !barriers_not_found.is_empty() {
                body["barriersNotFound"] = points_to_json(barriers_not_found);
            }
        }
        body
    }
}

/// Result type alias for geonet-trace operations
pub type Result<T> = std::result::Result<T, GeonetError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_json_shape() {
        let err = GeonetError::TraceLimitExceeded { count: 12, limit: 10 };
        assert_eq!(
            err.to_error_json(),
            json!({
                "errorDescription": "12 features were traced which exceeds the limit of 10",
                "hasError": true
            })
        );
    }

    #[test]
    fn test_no_valid_flags_carries_diagnostics() {
        let err = GeonetError::NoValidFlags {
            flags_not_found: vec![Point::new(1.0, 2.0)],
            barriers_not_found: vec![],
        };
        let body = err.to_error_json();
        assert_eq!(body["hasError"], json!(true));
        assert_eq!(body["flagsNotFound"], json!([{"x": 1.0, "y": 2.0}]));
        assert!(body.get("barriersNotFound").is_none());
    }

    #[test]
    fn test_no_traced_elements_message() {
        assert_eq!(
            GeonetError::NoTracedElementsFound(ElementType::Edge).to_string(),
            "No traced edges found"
        );
    }
}

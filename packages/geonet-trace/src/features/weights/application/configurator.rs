//! Weight & filter configurator
//!
//! Resolves weight names against the network schema and turns filter
//! expressions into typed ranges, producing the [`WeightSettings`] a solver
//! is configured with.

use super::range_parser::RangeParser;
use crate::config::LocaleConfig;
use crate::features::weights::domain::{WeightError, WeightRequest};
use crate::shared::models::{EdgeFilter, JunctionFilter, NetWeight, WeightSettings};
use crate::shared::ports::GeometricNetwork;

pub struct WeightConfigurator<'n> {
    network: &'n dyn GeometricNetwork,
    parser: RangeParser,
}

impl<'n> WeightConfigurator<'n> {
    pub fn new(network: &'n dyn GeometricNetwork, locale: &LocaleConfig) -> Self {
        Self {
            network,
            parser: RangeParser::new(locale),
        }
    }

    /// Look up a weight by name
    pub fn resolve(&self, name: &str) -> Result<NetWeight, WeightError> {
        self.network
            .weight_by_name(name)
            .ok_or_else(|| WeightError::NotFound(name.to_string()))
    }

    fn resolve_optional(&self, name: &Option<String>) -> Result<Option<NetWeight>, WeightError> {
        match non_empty(name) {
            Some(name) => self.resolve(name).map(Some),
            None => Ok(None),
        }
    }

    pub fn configure(&self, request: &WeightRequest) -> Result<WeightSettings, WeightError> {
        let settings = WeightSettings {
            junction_weight: self.resolve_optional(&request.junction_weight)?,
            from_to_edge_weight: self.resolve_optional(&request.from_to_edge_weight)?,
            to_from_edge_weight: self.resolve_optional(&request.to_from_edge_weight)?,
            junction_filter: self.junction_filter(request)?,
            edge_filter: self.edge_filter(request)?,
        };

        tracing::debug!(
            junction_weight = settings.junction_weight.is_some(),
            edge_weights = settings.from_to_edge_weight.is_some() || settings.to_from_edge_weight.is_some(),
            junction_filter = settings.junction_filter.is_some(),
            edge_filter = settings.edge_filter.is_some(),
            "weights_configured"
        );
        Ok(settings)
    }

    fn junction_filter(&self, request: &WeightRequest) -> Result<Option<JunctionFilter>, WeightError> {
        let Some(weight) = self.resolve_optional(&request.junction_filter_weight)? else {
            return Ok(None);
        };
        let ranges = match non_empty(&request.junction_filter_ranges) {
            Some(input) => self
                .parser
                .parse(input, weight.weight_type, &[weight.bit_gate_size])?,
            None => Vec::new(),
        };
        Ok(Some(JunctionFilter {
            weight,
            ranges,
            not_operator: request.junction_filter_not_operator,
        }))
    }

    fn edge_filter(&self, request: &WeightRequest) -> Result<Option<EdgeFilter>, WeightError> {
        let (from_to, to_from) = match (
            non_empty(&request.from_to_edge_filter_weight),
            non_empty(&request.to_from_edge_filter_weight),
        ) {
            (None, None) => return Ok(None),
            (Some(ft), Some(tf)) => (self.resolve(ft)?, self.resolve(tf)?),
            _ => return Err(WeightError::UnpairedEdgeFilter),
        };

        if from_to.weight_type != to_from.weight_type {
            return Err(WeightError::TypeMismatch {
                from_to: from_to.weight_type,
                to_from: to_from.weight_type,
            });
        }

        let ranges = match non_empty(&request.edge_filter_ranges) {
            Some(input) => self.parser.parse(
                input,
                from_to.weight_type,
                &[from_to.bit_gate_size, to_from.bit_gate_size],
            )?,
            None => Vec::new(),
        };
        Ok(Some(EdgeFilter {
            from_to,
            to_from,
            ranges,
            not_operator: request.edge_filter_not_operator,
        }))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

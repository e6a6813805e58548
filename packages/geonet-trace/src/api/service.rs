//! GeometricNetworkService - operation surface over a map catalog
//!
//! Typed entry points (`trace_network`, `isolate_valve`,
//! `trace_network_pos_along`) return [`Result`]. The JSON entry points
//! (`handle_operation`, `handle_resource`) never fail: errors are rendered
//! as `{"hasError": true, "errorDescription": "..."}`.

use super::help::{help_json, info_json};
use super::params::OperationInput;
use crate::config::{Capability, ServiceConfig};
use crate::errors::{GeonetError, Result};
use crate::features::network_info::{networks_json, GeometricNetworkInfo, MapCatalog};
use crate::features::position_along::{PosAlongOutcome, PosAlongRequest, PositionAlongEngine};
use crate::features::trace::{TraceOrchestrator, TraceOutcome, TraceRequest};
use crate::features::valve_isolation::{IsolationOutcome, IsolationRequest, ValveIsolationSolver};
use serde_json::Value;
use std::time::Instant;

// ═══════════════════════════════════════════════════════════════════════════
// Service
// ═══════════════════════════════════════════════════════════════════════════

/// Network tracing service for one map
///
/// Network descriptors are built once here and reused by every request.
#[derive(Debug, Clone)]
pub struct GeometricNetworkService {
    catalog: MapCatalog,
    infos: Vec<GeometricNetworkInfo>,
    config: ServiceConfig,
}

impl GeometricNetworkService {
    pub fn new(catalog: MapCatalog, config: ServiceConfig) -> Self {
        let infos = catalog.network_infos();
        tracing::info!(
            networks = infos.len(),
            layers = catalog.layers().len(),
            operations = ?config.capabilities.enabled(),
            "service_started"
        );
        Self {
            catalog,
            infos,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn catalog(&self) -> &MapCatalog {
        &self.catalog
    }

    pub fn network_infos(&self) -> &[GeometricNetworkInfo] {
        &self.infos
    }

    pub fn network_info(&self, network_id: i32) -> Result<&GeometricNetworkInfo> {
        self.infos
            .iter()
            .find(|info| info.id == network_id)
            .ok_or_else(|| GeonetError::not_found("geometric Network id not found"))
    }

    fn network_info_by_key(&self, network_id: &str) -> Result<&GeometricNetworkInfo> {
        let id = network_id
            .trim()
            .parse::<i32>()
            .map_err(|_| GeonetError::validation("geometric Network id not valid"))?;
        self.network_info(id)
    }

    fn ensure_enabled(&self, capability: Capability) -> Result<()> {
        if self.config.capabilities.allows(capability) {
            Ok(())
        } else {
            Err(GeonetError::CapabilityDisabled(capability.operation_name().to_string()))
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Typed operations
    // ═══════════════════════════════════════════════════════════════════════

    pub fn trace_network(&self, network_id: i32, request: &TraceRequest) -> Result<TraceOutcome> {
        self.ensure_enabled(Capability::TraceNetwork)?;
        let info = self.network_info(network_id)?;
        let mut request = request.clone();
        request.max_features = self.config.effective_max_features(request.max_features);
        TraceOrchestrator::new(info.network(), &self.config.locale).solve(&request)
    }

    pub fn isolate_valve(&self, network_id: i32, request: &IsolationRequest) -> Result<IsolationOutcome> {
        self.ensure_enabled(Capability::IsolateValve)?;
        let info = self.network_info(network_id)?;
        let mut request = request.clone();
        request.max_features = self.config.effective_max_features(request.max_features);
        ValveIsolationSolver::new(info.network()).solve(&request)
    }

    pub fn trace_network_pos_along(&self, network_id: i32, request: &PosAlongRequest) -> Result<PosAlongOutcome> {
        self.ensure_enabled(Capability::PositionAlong)?;
        let info = self.network_info(network_id)?;
        PositionAlongEngine::new(info.network()).solve(request)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // JSON surface
    // ═══════════════════════════════════════════════════════════════════════

    /// Run an operation by name on network `network_id`
    pub fn handle_operation(&self, network_id: &str, operation: &str, input: &Value) -> Value {
        let span = tracing::info_span!("operation", operation = %operation, network_id = %network_id);
        let _guard = span.enter();
        let started = Instant::now();

        match self.run_operation(network_id, operation, input) {
            Ok(response) => {
                tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "operation_completed");
                response
            }
            Err(err) => {
                if err.is_validation() {
                    tracing::warn!(error = %err, "operation_rejected");
                } else {
                    tracing::error!(error = %err, "operation_failed");
                }
                err.to_error_json()
            }
        }
    }

    fn run_operation(&self, network_id: &str, operation: &str, input: &Value) -> Result<Value> {
        let capability = operation_capability(operation)
            .ok_or_else(|| GeonetError::not_found(format!("Operation '{}' not found", operation)))?;
        self.ensure_enabled(capability)?;
        let info = self.network_info_by_key(network_id)?;
        let input = OperationInput::from_value(input)?;

        match capability {
            Capability::TraceNetwork => {
                let request = input.trace_request(&self.catalog)?;
                Ok(self.trace_network(info.id, &request)?.to_json())
            }
            Capability::IsolateValve => {
                let request = input.isolation_request(&self.catalog)?;
                Ok(self.isolate_valve(info.id, &request)?.to_json())
            }
            Capability::PositionAlong => {
                let request = input.pos_along_request()?;
                Ok(self
                    .trace_network_pos_along(info.id, &request)?
                    .to_json(&info.spatial_reference))
            }
        }
    }

    /// Read a resource: `GeometricNetworks` (all or one by id), `Info`, `Help`
    pub fn handle_resource(&self, resource: &str, network_id: Option<&str>) -> Value {
        let response = match (resource, network_id) {
            ("" | "GeometricNetworks", None) => Ok(networks_json(&self.infos)),
            ("" | "GeometricNetworks", Some(id)) => self.network_info_by_key(id).map(GeometricNetworkInfo::to_json),
            ("Info", _) => Ok(info_json(&self.config)),
            ("Help", _) => Ok(help_json()),
            (other, _) => Err(GeonetError::not_found(format!("Resource '{}' not found", other))),
        };
        response.unwrap_or_else(|err| {
            tracing::warn!(resource = %resource, error = %err, "resource_not_found");
            err.to_error_json()
        })
    }
}

fn operation_capability(operation: &str) -> Option<Capability> {
    [
        Capability::TraceNetwork,
        Capability::IsolateValve,
        Capability::PositionAlong,
    ]
    .into_iter()
    .find(|c| c.operation_name().eq_ignore_ascii_case(operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_names() {
        assert_eq!(operation_capability("TraceNetwork"), Some(Capability::TraceNetwork));
        assert_eq!(operation_capability("tracenetworkposalong"), Some(Capability::PositionAlong));
        assert_eq!(operation_capability("Buffer"), None);
    }

    #[test]
    fn test_empty_catalog_errors() {
        let service = GeometricNetworkService::new(MapCatalog::new(), ServiceConfig::default());
        assert_eq!(service.handle_resource("GeometricNetworks", None), json!({"GeometricNetworks": []}));

        let response = service.handle_operation("abc", "TraceNetwork", &json!({}));
        assert_eq!(response["errorDescription"], json!("geometric Network id not valid"));

        let response = service.handle_operation("1", "TraceNetwork", &json!({}));
        assert_eq!(response["errorDescription"], json!("geometric Network id not found"));

        let response = service.handle_resource("Layers", None);
        assert_eq!(response["hasError"], json!(true));
    }
}

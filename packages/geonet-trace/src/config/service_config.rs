//! Service configuration
//!
//! ```yaml
//! version: 1
//! locale:
//!   decimal_separator: ","
//! capabilities:
//!   trace_network: true
//!   isolate_valve: true
//!   position_along: false
//! limits:
//!   max_traced_features_cap: 5000
//! ```
//!
//! Every section is optional; missing sections take their defaults.

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, SUPPORTED_VERSIONS};
use super::validation::{check_range, Validatable};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ═══════════════════════════════════════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════════════════════════════════════

/// Number formatting of request values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleConfig {
    /// Decimal separator of the host locale, `.` or `,`
    pub decimal_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
        }
    }
}

impl LocaleConfig {
    /// Separator between filter ranges, chosen to never clash with decimals
    pub fn range_separator(&self) -> char {
        if self.decimal_separator == '.' {
            ','
        } else {
            ';'
        }
    }
}

impl Validatable for LocaleConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.decimal_separator != '.' && self.decimal_separator != ',' {
            return Err(ConfigError::Validation(format!(
                "locale.decimal_separator must be '.' or ',', found '{}'",
                self.decimal_separator
            )));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "LocaleConfig"
    }
}

/// Operations exposed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    TraceNetwork,
    IsolateValve,
    PositionAlong,
}

impl Capability {
    pub fn operation_name(&self) -> &'static str {
        match self {
            Capability::TraceNetwork => "TraceNetwork",
            Capability::IsolateValve => "IsolateValve",
            Capability::PositionAlong => "TraceNetworkPosAlong",
        }
    }
}

/// Capability switches, all enabled by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Capabilities {
    pub trace_network: bool,
    pub isolate_valve: bool,
    pub position_along: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            trace_network: true,
            isolate_valve: true,
            position_along: true,
        }
    }
}

impl Capabilities {
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::TraceNetwork => self.trace_network,
            Capability::IsolateValve => self.isolate_valve,
            Capability::PositionAlong => self.position_along,
        }
    }

    pub fn enabled(&self) -> Vec<Capability> {
        [
            Capability::TraceNetwork,
            Capability::IsolateValve,
            Capability::PositionAlong,
        ]
        .into_iter()
        .filter(|c| self.allows(*c))
        .collect()
    }
}

/// Service-wide limits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Upper bound applied on top of each request's `maxTracedFeatures`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_traced_features_cap: Option<usize>,
}

impl Validatable for LimitsConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(cap) = self.max_traced_features_cap {
            check_range(
                "limits.max_traced_features_cap",
                cap,
                1,
                i32::MAX as usize,
                "Remove the cap or use a positive value",
            )?;
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "LimitsConfig"
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ServiceConfig
// ═══════════════════════════════════════════════════════════════════════════

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub locale: LocaleConfig,
    pub capabilities: Capabilities,
    pub limits: LimitsConfig,
}

impl ServiceConfig {
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.locale.decimal_separator = separator;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_max_traced_features_cap(mut self, cap: usize) -> Self {
        self.limits.max_traced_features_cap = Some(cap);
        self
    }

    /// Request cap narrowed by the service-wide cap
    pub fn effective_max_features(&self, requested: usize) -> usize {
        match self.limits.max_traced_features_cap {
            Some(cap) => requested.min(cap),
            None => requested,
        }
    }

    /// Load and validate a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        if raw.get("version").is_none() {
            return Err(ConfigError::MissingVersion);
        }
        let export: ConfigExportV1 = serde_yaml::from_value(raw)?;

        // Version check
        if !SUPPORTED_VERSIONS.contains(&export.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: export.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            locale: export.locale.unwrap_or_default(),
            capabilities: export.capabilities.unwrap_or_default(),
            limits: export.limits.unwrap_or_default(),
        };
        config.validate()?;

        tracing::info!(
            decimal_separator = %config.locale.decimal_separator,
            capabilities = ?config.capabilities.enabled(),
            "service_config_loaded"
        );
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: 1,
            locale: Some(self.locale),
            capabilities: Some(self.capabilities),
            limits: Some(self.limits),
        };
        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

impl Validatable for ServiceConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.locale.validate()?;
        self.limits.validate()?;
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "ServiceConfig"
    }
}

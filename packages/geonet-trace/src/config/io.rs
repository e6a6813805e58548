//! Configuration I/O (YAML schema types)
//!
//! Loading and conversion live in `service_config.rs`.

use super::service_config::{Capabilities, LimitsConfig, LocaleConfig};
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<LocaleConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<LimitsConfig>,
}

/// Versions this build can read
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

//! Service configuration system
//!
//! Configuration is optional: [`ServiceConfig::default`] serves every
//! operation with a `.` decimal separator and no service-wide feature cap.
//! A YAML file (schema v1) can narrow the capabilities, switch the locale
//! or cap traced features.
//!
//! # Examples
//!
//! ```rust,ignore
//! use geonet_trace::config::ServiceConfig;
//!
//! let config = ServiceConfig::from_yaml("geonet.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod service_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigExportV1;
pub use service_config::{Capabilities, Capability, LimitsConfig, LocaleConfig, ServiceConfig};
pub use validation::Validatable;

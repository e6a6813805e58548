//! Configuration validation
//!
//! Every configuration section implements [`Validatable`]; the service
//! validates the whole configuration once at construction.

use super::error::{ConfigError, ConfigResult};

// ═══════════════════════════════════════════════════════════════════════════
// Validatable Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

impl<T: Validatable> Validatable for Option<T> {
    fn validate(&self) -> ConfigResult<()> {
        match self {
            Some(config) => config.validate(),
            None => Ok(()),
        }
    }

    fn config_name(&self) -> &'static str {
        match self {
            Some(config) => config.config_name(),
            None => "None",
        }
    }
}

/// Check `value` lies in `min..=max`
pub fn check_range<T>(field: &str, value: T, min: T, max: T, hint: &str) -> ConfigResult<()>
where
    T: PartialOrd + ToString + Copy,
{
    if value < min || value > max {
        return Err(ConfigError::range_with_hint(field, value, min, max, hint));
    }
    Ok(())
}

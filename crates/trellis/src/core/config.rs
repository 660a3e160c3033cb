use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    layout::Units,
};

/// Scheduler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Smallest non-zero sleep hint returned by a frame.
    pub min_sleep_ms: u32,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self { min_sleep_ms: 5 }
    }
}

/// Host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Display metrics.
    pub units: Units,
    /// Scheduler settings.
    pub updater: UpdaterConfig,
}

impl Config {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let c: Self = serde_json::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        c.validate()?;
        Ok(c)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.units.dots_per_inch.is_nan() || self.units.dots_per_inch <= 0.0 {
            return Err(Error::Config(format!(
                "dots_per_inch must be positive, got {}",
                self.units.dots_per_inch
            )));
        }
        if self.units.dots_per_pp.is_nan() || self.units.dots_per_pp <= 0.0 {
            return Err(Error::Config(format!(
                "dots_per_pp must be positive, got {}",
                self.units.dots_per_pp
            )));
        }
        Ok(())
    }
}

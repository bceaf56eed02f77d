//! `OPENAI_TEMPERATURE` parsing. A bad value is never fatal: it is reported
//! and replaced by the setting's default.

use log::warn;
use thiserror::Error;

pub const TEMPERATURE_ENV: &str = "OPENAI_TEMPERATURE";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemperatureError {
    #[error("could not convert {0:?} to a number")]
    NotANumber(String),

    #[error("{value} must be between {min} and {max}")]
    OutOfRange { value: f32, min: f32, max: f32 },
}

/// Default and inclusive bounds for the sampling temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSetting {
    pub default: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for TemperatureSetting {
    fn default() -> Self {
        Self::EXTENDED
    }
}

impl TemperatureSetting {
    /// Current range, used by the trading and Michi personas.
    pub const EXTENDED: Self = Self {
        default: 0.7,
        min: 0.0,
        max: 1.5,
    };

    /// Narrower range the AVA persona was tuned with.
    pub const LEGACY: Self = Self {
        default: 1.0,
        min: 0.0,
        max: 1.0,
    };

    /// Parse and range-check `raw`. A missing value is the default.
    pub fn validate(&self, raw: Option<&str>) -> Result<f32, TemperatureError> {
        let Some(raw) = raw else {
            return Ok(self.default);
        };
        let value: f32 = raw
            .trim()
            .parse()
            .map_err(|_| TemperatureError::NotANumber(raw.to_string()))?;
        // NaN fails the range check too.
        if !(self.min..=self.max).contains(&value) {
            return Err(TemperatureError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }

    /// Validated temperature, or the default with a warning.
    pub fn resolve(&self, raw: Option<&str>) -> f32 {
        match self.validate(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Invalid {TEMPERATURE_ENV} value: {e}. Falling back to default temperature of {}.",
                    self.default
                );
                self.default
            }
        }
    }
}

//! Kitchen policy knobs.
//!
//! Defaults encode the camp's standing rules (3 meals a day, 250 g of staple
//! debited per distributed portion, ...). Deployments can override them from
//! a JSON document or `CAMPKITCHEN_*` environment variables.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_LOW_STOCK_WARNING: &str = "CAMPKITCHEN_LOW_STOCK_WARNING";
pub const ENV_LOW_STOCK_REPORT: &str = "CAMPKITCHEN_LOW_STOCK_REPORT";
pub const ENV_MEALS_PER_DAY: &str = "CAMPKITCHEN_MEALS_PER_DAY";
pub const ENV_SAFE_DAYS: &str = "CAMPKITCHEN_SAFE_DAYS";
pub const ENV_CAUTION_DAYS: &str = "CAMPKITCHEN_CAUTION_DAYS";
pub const ENV_STAPLE_KG_PER_PORTION: &str = "CAMPKITCHEN_STAPLE_KG_PER_PORTION";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse kitchen config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid kitchen config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    /// Intake that leaves an item below this quantity emits a low-stock warning.
    pub low_stock_warning: f64,
    /// Items below this quantity are listed in the stock report.
    pub low_stock_report_threshold: f64,
    pub meals_per_day: u32,
    /// Survival days at or above this are SAFE.
    pub safe_days: u64,
    /// Survival days at or above this (and below `safe_days`) are CAUTION.
    pub caution_days: u64,
    /// Staple kilograms debited per distributed portion.
    pub staple_kg_per_distributed_portion: f64,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            low_stock_warning: 20.0,
            low_stock_report_threshold: 15.0,
            meals_per_day: 3,
            safe_days: 7,
            caution_days: 3,
            staple_kg_per_distributed_portion: 0.25,
        }
    }
}

impl KitchenConfig {
    /// Defaults overridden by any `CAMPKITCHEN_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (usually the process environment).
    /// Unparsable values are logged and ignored.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        override_from(&lookup, ENV_LOW_STOCK_WARNING, &mut self.low_stock_warning);
        override_from(&lookup, ENV_LOW_STOCK_REPORT, &mut self.low_stock_report_threshold);
        override_from(&lookup, ENV_MEALS_PER_DAY, &mut self.meals_per_day);
        override_from(&lookup, ENV_SAFE_DAYS, &mut self.safe_days);
        override_from(&lookup, ENV_CAUTION_DAYS, &mut self.caution_days);
        override_from(
            &lookup,
            ENV_STAPLE_KG_PER_PORTION,
            &mut self.staple_kg_per_distributed_portion,
        );
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("low_stock_warning", self.low_stock_warning),
            ("low_stock_report_threshold", self.low_stock_report_threshold),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.staple_kg_per_distributed_portion.is_finite()
            || self.staple_kg_per_distributed_portion <= 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "staple_kg_per_distributed_portion must be positive, got {}",
                self.staple_kg_per_distributed_portion
            )));
        }
        if self.meals_per_day == 0 {
            return Err(ConfigError::Invalid("meals_per_day must be at least 1".to_string()));
        }
        if self.caution_days > self.safe_days {
            return Err(ConfigError::Invalid(format!(
                "caution_days ({}) cannot exceed safe_days ({})",
                self.caution_days, self.safe_days
            )));
        }
        Ok(())
    }
}

fn override_from<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!(key, value = %raw, "ignoring unparsable config override"),
    }
}

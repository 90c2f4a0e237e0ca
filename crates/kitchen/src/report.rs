//! Read-only projections over kitchen state, consumed by presentation code.
//!
//! Field names are stable: they are the keys presentation layers and JSON
//! output rely on.

use serde::{Deserialize, Serialize};

use crate::config::KitchenConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReport {
    pub total_items: usize,
    pub total_available_portions: u64,
    pub low_stock_count: usize,
    /// One info line per item, sorted by name.
    pub items: Vec<String>,
    pub low_stock_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientReport {
    pub total_recipients: usize,
    pub total_dependents: u64,
    /// One info line per recipient, sorted by id.
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    pub total_distributions: usize,
    pub total_portions_distributed: u64,
    /// One info line per distribution, oldest first.
    pub distributions: Vec<String>,
}

/// Coarse adequacy of the food supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NutritionLevel {
    Safe,
    Caution,
    Critical,
}

impl NutritionLevel {
    pub fn from_survival_days(days: u64, config: &KitchenConfig) -> Self {
        if days >= config.safe_days {
            NutritionLevel::Safe
        } else if days >= config.caution_days {
            NutritionLevel::Caution
        } else {
            NutritionLevel::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NutritionLevel::Safe => "SAFE",
            NutritionLevel::Caution => "CAUTION",
            NutritionLevel::Critical => "CRITICAL",
        }
    }
}

impl core::fmt::Display for NutritionLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Projection of how long current stock feeds everyone registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionStatus {
    pub total_dependents: u64,
    pub available_portions: u64,
    pub daily_need: u64,
    pub survival_days: u64,
    pub status: NutritionLevel,
}

impl NutritionStatus {
    /// `daily_need = dependents * meals_per_day`; days are floored and are 0
    /// when nobody is registered.
    pub fn project(total_dependents: u64, available_portions: u64, config: &KitchenConfig) -> Self {
        let daily_need = total_dependents.saturating_mul(u64::from(config.meals_per_day));
        let survival_days = if daily_need > 0 {
            available_portions / daily_need
        } else {
            0
        };
        Self {
            total_dependents,
            available_portions,
            daily_need,
            survival_days,
            status: NutritionLevel::from_survival_days(survival_days, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn four_dependents_with_400_portions_is_safe_for_33_days() {
        let status = NutritionStatus::project(4, 400, &KitchenConfig::default());
        assert_eq!(status.daily_need, 12);
        assert_eq!(status.survival_days, 33);
        assert_eq!(status.status, NutritionLevel::Safe);
    }

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        let config = KitchenConfig::default();
        assert_eq!(NutritionLevel::from_survival_days(7, &config), NutritionLevel::Safe);
        assert_eq!(NutritionLevel::from_survival_days(6, &config), NutritionLevel::Caution);
        assert_eq!(NutritionLevel::from_survival_days(3, &config), NutritionLevel::Caution);
        assert_eq!(NutritionLevel::from_survival_days(2, &config), NutritionLevel::Critical);
    }

    #[test]
    fn nobody_registered_means_zero_days() {
        let status = NutritionStatus::project(0, 1_000, &KitchenConfig::default());
        assert_eq!(status.daily_need, 0);
        assert_eq!(status.survival_days, 0);
        assert_eq!(status.status, NutritionLevel::Critical);
    }

    #[test]
    fn status_serializes_as_upper_case_label() {
        let status = NutritionStatus::project(1, 15, &KitchenConfig::default());
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "CAUTION");
        assert_eq!(json["survival_days"], 5);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// survival_days * daily_need never exceeds what is available.
        #[test]
        fn projection_never_overstates_supply(deps in 1u64..10_000, portions in 0u64..1_000_000) {
            let status = NutritionStatus::project(deps, portions, &KitchenConfig::default());
            prop_assert!(status.survival_days * status.daily_need <= portions);
            prop_assert!((status.survival_days + 1) * status.daily_need > portions);
        }
    }
}

//! Portion accounting and distribution for a relief-camp kitchen.
//!
//! [`KitchenEngine`] holds the business rules: stock intake with same-name
//! merging, recipient registration, bottleneck portion availability,
//! all-or-nothing distribution, and the reports built on top of them.

pub mod config;
pub mod engine;
pub mod event;
pub mod report;

pub use config::{ConfigError, KitchenConfig};
pub use engine::{InMemoryKitchen, KitchenEngine};
pub use event::KitchenEvent;
pub use report::{
    DistributionReport, NutritionLevel, NutritionStatus, RecipientReport, StockReport,
};

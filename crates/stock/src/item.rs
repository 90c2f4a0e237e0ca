use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campkitchen_core::{DomainError, DomainResult, Entity, Quantity};

/// Grams of a staple (rice, noodles, ...) in one standard portion.
pub const DEFAULT_STAPLE_GRAMS_PER_PORTION: f64 = 250.0;
/// Kilograms of protein (chicken, eggs, fish, ...) in one standard portion.
pub const DEFAULT_PROTEIN_KG_PER_PORTION: f64 = 0.15;
/// Kilograms of vegetables in one standard portion.
pub const DEFAULT_VEGETABLE_KG_PER_PORTION: f64 = 0.1;

/// Relative tolerance, in ULPs, applied before flooring. Wide enough that
/// `0.3 kg / 0.1 kg` counts 3 portions, too narrow to round up a real
/// partial portion.
const PORTION_ULPS: f64 = 4.0;

/// Stock category with its portion-conversion parameter.
///
/// The set is closed; `compute_portions` matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StockCategory {
    Staple { grams_per_portion: f64 },
    Protein { kg_per_portion: f64 },
    Vegetable { kg_per_portion: f64 },
}

/// Category tag without its parameter (parsing, filtering, display).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockKind {
    Staple,
    Protein,
    Vegetable,
}

impl StockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StockKind::Staple => "staple",
            StockKind::Protein => "protein",
            StockKind::Vegetable => "vegetable",
        }
    }
}

impl core::fmt::Display for StockKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for StockKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "staple" => Ok(StockKind::Staple),
            "protein" => Ok(StockKind::Protein),
            "vegetable" => Ok(StockKind::Vegetable),
            other => Err(DomainError::validation(format!(
                "unknown stock category '{other}' (expected staple, protein or vegetable)"
            ))),
        }
    }
}

impl StockCategory {
    /// Category with the standard per-portion parameter.
    pub fn with_defaults(kind: StockKind) -> Self {
        match kind {
            StockKind::Staple => StockCategory::Staple {
                grams_per_portion: DEFAULT_STAPLE_GRAMS_PER_PORTION,
            },
            StockKind::Protein => StockCategory::Protein {
                kg_per_portion: DEFAULT_PROTEIN_KG_PER_PORTION,
            },
            StockKind::Vegetable => StockCategory::Vegetable {
                kg_per_portion: DEFAULT_VEGETABLE_KG_PER_PORTION,
            },
        }
    }

    pub fn kind(&self) -> StockKind {
        match self {
            StockCategory::Staple { .. } => StockKind::Staple,
            StockCategory::Protein { .. } => StockKind::Protein,
            StockCategory::Vegetable { .. } => StockKind::Vegetable,
        }
    }

    pub fn is_staple(&self) -> bool {
        matches!(self, StockCategory::Staple { .. })
    }

    /// Whole portions that `quantity` (in kg) converts to. Partial portions
    /// are dropped, never rounded up.
    pub fn portions_for(&self, quantity: Quantity) -> u64 {
        let q = quantity.value();
        let raw = match *self {
            StockCategory::Staple { grams_per_portion } => q * 1000.0 / grams_per_portion,
            StockCategory::Protein { kg_per_portion } => q / kg_per_portion,
            StockCategory::Vegetable { kg_per_portion } => q / kg_per_portion,
        };
        // `as` saturates at the u64 bounds.
        (raw + raw.abs() * PORTION_ULPS * f64::EPSILON).floor() as u64
    }

    fn parameter(&self) -> f64 {
        match *self {
            StockCategory::Staple { grams_per_portion } => grams_per_portion,
            StockCategory::Protein { kg_per_portion } => kg_per_portion,
            StockCategory::Vegetable { kg_per_portion } => kg_per_portion,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        let p = self.parameter();
        if !p.is_finite() || p <= 0.0 {
            return Err(DomainError::invalid_quantity(format!(
                "{} per-portion amount must be positive, got {p}",
                self.kind()
            )));
        }
        Ok(())
    }
}

/// A named stock entry in the kitchen store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    name: String,
    quantity: Quantity,
    unit: String,
    category: StockCategory,
    received_at: DateTime<Utc>,
}

impl StockItem {
    /// Create a stock entry received now.
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        category: StockCategory,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::empty_identifier("stock item name"));
        }
        let quantity = Quantity::new(quantity)?;
        category.validate()?;

        tracing::debug!(item = %name, quantity = quantity.value(), kind = %category.kind(), "stock item created");

        Ok(Self {
            name,
            quantity,
            unit: unit.into(),
            category,
            received_at: Utc::now(),
        })
    }

    /// Staple measured in kg with the standard 250 g portion.
    pub fn staple(name: impl Into<String>, quantity_kg: f64) -> DomainResult<Self> {
        Self::new(name, quantity_kg, "kg", StockCategory::with_defaults(StockKind::Staple))
    }

    /// Protein measured in kg with the standard 0.15 kg portion.
    pub fn protein(name: impl Into<String>, quantity_kg: f64) -> DomainResult<Self> {
        Self::new(name, quantity_kg, "kg", StockCategory::with_defaults(StockKind::Protein))
    }

    /// Vegetables measured in kg with the standard 0.1 kg portion.
    pub fn vegetable(name: impl Into<String>, quantity_kg: f64) -> DomainResult<Self> {
        Self::new(name, quantity_kg, "kg", StockCategory::with_defaults(StockKind::Vegetable))
    }

    /// Override the intake timestamp (seeding, tests).
    pub fn with_received_at(mut self, at: DateTime<Utc>) -> Self {
        self.received_at = at;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> f64 {
        self.quantity.value()
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn category(&self) -> StockCategory {
        self.category
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Servable portions from the current quantity.
    pub fn compute_portions(&self) -> u64 {
        self.category.portions_for(self.quantity)
    }

    /// Increase the quantity on hand.
    pub fn add_stock(&mut self, amount: f64) -> DomainResult<()> {
        let amount = Quantity::new(amount)?;
        self.quantity = self.quantity.checked_add(amount)?;
        tracing::debug!(item = %self.name, added = amount.value(), quantity = self.quantity.value(), "stock increased");
        Ok(())
    }

    /// Decrease the quantity on hand. Fails without mutating if `amount` is
    /// negative or exceeds what is available.
    pub fn remove_stock(&mut self, amount: f64) -> DomainResult<()> {
        let amount = Quantity::new(amount)?;
        self.quantity = self.quantity.checked_sub(amount)?;
        tracing::debug!(item = %self.name, removed = amount.value(), quantity = self.quantity.value(), "stock decreased");
        Ok(())
    }

    /// One-line summary for reports.
    pub fn info(&self) -> String {
        format!(
            "{}: {} {} | Received: {}",
            self.name,
            self.quantity,
            self.unit,
            self.received_at.format("%Y-%m-%d %H:%M")
        )
    }
}

impl Entity for StockItem {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn default_portion_formulas() {
        assert_eq!(StockItem::staple("Rice", 100.0).unwrap().compute_portions(), 400);
        assert_eq!(StockItem::protein("Chicken", 50.0).unwrap().compute_portions(), 333);
        assert_eq!(StockItem::vegetable("Water Spinach", 30.0).unwrap().compute_portions(), 300);
    }

    #[test]
    fn partial_portions_are_dropped() {
        // 0.49 kg of rice is 1.96 portions of 250 g.
        assert_eq!(StockItem::staple("Rice", 0.49).unwrap().compute_portions(), 1);
        assert_eq!(StockItem::protein("Egg", 0.149).unwrap().compute_portions(), 0);
    }

    #[test]
    fn exact_multiples_survive_float_error() {
        assert_eq!(StockItem::vegetable("Cabbage", 0.3).unwrap().compute_portions(), 3);
        assert_eq!(StockItem::protein("Fish", 0.45).unwrap().compute_portions(), 3);
    }

    #[test]
    fn near_whole_partial_portion_is_not_rounded_up() {
        // 2.9999999995 portions of vegetables.
        assert_eq!(
            StockItem::vegetable("Cabbage", 0.29999999995).unwrap().compute_portions(),
            2
        );
        // 3.9999999996 portions of rice.
        assert_eq!(StockItem::staple("Rice", 0.9999999999).unwrap().compute_portions(), 3);
    }

    #[test]
    fn custom_parameter_is_used() {
        let noodles = StockItem::new(
            "Noodles",
            10.0,
            "kg",
            StockCategory::Staple { grams_per_portion: 100.0 },
        )
        .unwrap();
        assert_eq!(noodles.compute_portions(), 100);
    }

    #[test]
    fn construction_rejects_blank_name_and_bad_amounts() {
        match StockItem::staple("   ", 1.0).unwrap_err() {
            DomainError::EmptyIdentifier(_) => {}
            other => panic!("Expected EmptyIdentifier, got {other:?}"),
        }
        match StockItem::staple("Rice", -1.0).unwrap_err() {
            DomainError::InvalidQuantity(_) => {}
            other => panic!("Expected InvalidQuantity, got {other:?}"),
        }
        let zero_portion = StockCategory::Protein { kg_per_portion: 0.0 };
        match StockItem::new("Tofu", 1.0, "kg", zero_portion).unwrap_err() {
            DomainError::InvalidQuantity(_) => {}
            other => panic!("Expected InvalidQuantity, got {other:?}"),
        }
    }

    #[test]
    fn remove_more_than_available_fails_and_keeps_quantity() {
        let mut rice = StockItem::staple("Rice", 5.0).unwrap();
        let err = rice.remove_stock(6.0).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock(6.0, 5.0));
        assert_eq!(rice.quantity(), 5.0);
    }

    #[test]
    fn negative_mutations_are_rejected() {
        let mut rice = StockItem::staple("Rice", 5.0).unwrap();
        assert!(matches!(rice.add_stock(-1.0), Err(DomainError::InvalidQuantity(_))));
        assert!(matches!(rice.remove_stock(-1.0), Err(DomainError::InvalidQuantity(_))));
        assert_eq!(rice.quantity(), 5.0);
    }

    #[test]
    fn info_includes_quantity_and_intake_time() {
        let rice = StockItem::staple("Rice", 12.5).unwrap().with_received_at(test_time());
        assert_eq!(rice.info(), "Rice: 12.50 kg | Received: 2024-03-01 08:30");
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Protein".parse::<StockKind>().unwrap(), StockKind::Protein);
        assert!("grain".parse::<StockKind>().is_err());
    }

    fn any_category() -> impl Strategy<Value = StockCategory> {
        prop_oneof![
            (50.0f64..500.0).prop_map(|g| StockCategory::Staple { grams_per_portion: g }),
            (0.05f64..1.0).prop_map(|k| StockCategory::Protein { kg_per_portion: k }),
            (0.05f64..1.0).prop_map(|k| StockCategory::Vegetable { kg_per_portion: k }),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// More stock never means fewer portions.
        #[test]
        fn portions_are_monotonic_in_quantity(
            category in any_category(),
            a in 0.0f64..5_000.0,
            b in 0.0f64..5_000.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let small = StockItem::new("Item", lo, "kg", category).unwrap();
            let large = StockItem::new("Item", hi, "kg", category).unwrap();
            prop_assert!(small.compute_portions() <= large.compute_portions());
        }

        /// add_stock followed by remove_stock of the same amount restores the quantity.
        #[test]
        fn add_then_remove_round_trips(start in 0.0f64..1_000.0, amount in 0.0f64..1_000.0) {
            let mut item = StockItem::staple("Rice", start).unwrap();
            item.add_stock(amount).unwrap();
            item.remove_stock(amount).unwrap();
            prop_assert!((item.quantity() - start).abs() < 1e-9);
        }
    }
}

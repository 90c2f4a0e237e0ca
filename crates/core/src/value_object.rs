//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. They are defined entirely by their
//! attribute values, and two value objects with the same values are equal.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// - **Value Object**: no identity (a `Quantity` of 2.5 equals any other 2.5)
/// - **Entity**: has identity (two recipients with the same id are the same person)
///
/// To "modify" a value object, produce a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A non-negative, finite amount of stock in the item's own unit.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quantity(f64);

impl ValueObject for Quantity {}

impl Quantity {
    /// Validate a raw amount: it must be finite and `>= 0`.
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::invalid_quantity(format!(
                "amount must be finite, got {value}"
            )));
        }
        if value < 0.0 {
            return Err(DomainError::invalid_quantity(format!(
                "amount cannot be negative, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Sum of two quantities. Fails only if the result overflows to infinity.
    pub fn checked_add(self, other: Quantity) -> DomainResult<Self> {
        Self::new(self.0 + other.0)
    }

    /// Difference of two quantities; fails with `InsufficientStock` rather than
    /// going negative.
    pub fn checked_sub(self, other: Quantity) -> DomainResult<Self> {
        if other.0 > self.0 {
            return Err(DomainError::insufficient_stock(other.0, self.0));
        }
        Ok(Self(self.0 - other.0))
    }
}

impl TryFrom<f64> for Quantity {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for f64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        for raw in [-0.5, f64::NAN, f64::INFINITY] {
            match Quantity::new(raw).unwrap_err() {
                DomainError::InvalidQuantity(_) => {}
                other => panic!("Expected InvalidQuantity for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let on_hand = Quantity::new(3.0).unwrap();
        let err = on_hand.checked_sub(Quantity::new(3.5).unwrap()).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock(3.5, 3.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Adding then removing the same amount restores the original value.
        #[test]
        fn add_then_sub_round_trips(base in 0.0f64..10_000.0, delta in 0.0f64..10_000.0) {
            let q = Quantity::new(base).unwrap();
            let d = Quantity::new(delta).unwrap();
            let back = q.checked_add(d).unwrap().checked_sub(d).unwrap();
            prop_assert!((back.value() - base).abs() < 1e-6);
        }
    }
}

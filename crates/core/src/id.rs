//! Strongly-typed identifiers used across the domain.
//!
//! Camp identifiers are human-issued strings (e.g. `KRB-001`), so these wrap a
//! trimmed, non-empty `String` rather than a UUID.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a registered recipient (displaced person / household head).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(String);

/// Identifier of a completed distribution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistributionId(String);

/// Identifier of a kitchen volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolunteerId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create an identifier, rejecting blank input.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::empty_identifier($name));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_string_newtype!(RecipientId, "RecipientId");
impl_string_newtype!(DistributionId, "DistributionId");
impl_string_newtype!(VolunteerId, "VolunteerId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_trimmed() {
        let id = RecipientId::new("  KRB-001 ").unwrap();
        assert_eq!(id.as_str(), "KRB-001");
        assert_eq!(id.to_string(), "KRB-001");
    }

    #[test]
    fn blank_ids_are_rejected() {
        let err = RecipientId::from_str("   ").unwrap_err();
        match err {
            DomainError::EmptyIdentifier(field) => assert_eq!(field, "RecipientId"),
            _ => panic!("Expected EmptyIdentifier for blank id"),
        }
    }
}

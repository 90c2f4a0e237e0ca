use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campkitchen_core::{DomainError, DomainResult, Entity, RecipientId};

/// Special-needs category of a household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialNeeds {
    #[default]
    General,
    Elderly,
    Infant,
    Sick,
}

impl SpecialNeeds {
    pub fn as_str(self) -> &'static str {
        match self {
            SpecialNeeds::General => "General",
            SpecialNeeds::Elderly => "Elderly",
            SpecialNeeds::Infant => "Infant",
            SpecialNeeds::Sick => "Sick",
        }
    }
}

impl core::fmt::Display for SpecialNeeds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for SpecialNeeds {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(SpecialNeeds::General),
            "elderly" => Ok(SpecialNeeds::Elderly),
            "infant" => Ok(SpecialNeeds::Infant),
            "sick" => Ok(SpecialNeeds::Sick),
            "" => Err(DomainError::empty_identifier("special needs")),
            other => Err(DomainError::validation(format!(
                "special needs '{other}' (expected general, elderly, infant or sick)"
            ))),
        }
    }
}

/// A registered displaced person, fed together with their dependents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    id: RecipientId,
    name: String,
    needs: SpecialNeeds,
    dependents: u32,
    registered_at: DateTime<Utc>,
}

impl Recipient {
    /// Register a person now.
    ///
    /// `dependents` counts everyone fed under this registration, so it is at
    /// least 1 (the person themself).
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        needs: SpecialNeeds,
        dependents: u32,
    ) -> DomainResult<Self> {
        let name = validate_name(name.into())?;
        let id = RecipientId::new(id)?;
        if dependents < 1 {
            return Err(DomainError::InvalidDependents(dependents));
        }

        tracing::debug!(recipient_id = %id, dependents, needs = %needs, "recipient created");

        Ok(Self {
            id,
            name,
            needs,
            dependents,
            registered_at: Utc::now(),
        })
    }

    /// Override the registration timestamp (seeding, tests).
    pub fn with_registered_at(mut self, at: DateTime<Utc>) -> Self {
        self.registered_at = at;
        self
    }

    pub fn id_typed(&self) -> &RecipientId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn needs(&self) -> SpecialNeeds {
        self.needs
    }

    pub fn dependents(&self) -> u32 {
        self.dependents
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    pub fn set_dependents(&mut self, dependents: u32) -> DomainResult<()> {
        if dependents < 1 {
            return Err(DomainError::InvalidDependents(dependents));
        }
        self.dependents = dependents;
        tracing::debug!(recipient_id = %self.id, dependents, "dependents updated");
        Ok(())
    }

    /// One-line summary for reports.
    pub fn info(&self) -> String {
        format!(
            "[RECIPIENT] {} (ID: {}) | Needs: {} | Dependents: {} | Registered: {}",
            self.name,
            self.id,
            self.needs,
            self.dependents,
            self.registered_at.format("%Y-%m-%d %H:%M")
        )
    }
}

impl Entity for Recipient {
    type Id = RecipientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

pub(crate) fn validate_name(name: String) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::empty_identifier("name"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap()
    }

    #[test]
    fn new_recipient_keeps_fields() {
        let r = Recipient::new("Budi Santoso", "KRB-001", SpecialNeeds::General, 4).unwrap();
        assert_eq!(r.id_typed().as_str(), "KRB-001");
        assert_eq!(r.name(), "Budi Santoso");
        assert_eq!(r.dependents(), 4);
        assert_eq!(r.needs(), SpecialNeeds::General);
    }

    #[test]
    fn zero_dependents_is_rejected() {
        let err = Recipient::new("Siti Aminah", "KRB-002", SpecialNeeds::Elderly, 0).unwrap_err();
        assert_eq!(err, DomainError::InvalidDependents(0));
    }

    #[test]
    fn blank_name_or_id_is_rejected() {
        match Recipient::new("  ", "KRB-003", SpecialNeeds::Infant, 1).unwrap_err() {
            DomainError::EmptyIdentifier(_) => {}
            other => panic!("Expected EmptyIdentifier for blank name, got {other:?}"),
        }
        match Recipient::new("Ahmad Yani", "", SpecialNeeds::Infant, 1).unwrap_err() {
            DomainError::EmptyIdentifier(_) => {}
            other => panic!("Expected EmptyIdentifier for blank id, got {other:?}"),
        }
    }

    #[test]
    fn set_dependents_validates_and_keeps_old_value_on_error() {
        let mut r = Recipient::new("Budi", "KRB-001", SpecialNeeds::General, 2).unwrap();
        assert!(r.set_dependents(0).is_err());
        assert_eq!(r.dependents(), 2);
        r.set_dependents(5).unwrap();
        assert_eq!(r.dependents(), 5);
    }

    #[test]
    fn set_name_rejects_blank() {
        let mut r = Recipient::new("Budi", "KRB-001", SpecialNeeds::General, 2).unwrap();
        assert!(r.set_name(" ").is_err());
        r.set_name("Budi Santoso").unwrap();
        assert_eq!(r.name(), "Budi Santoso");
    }

    #[test]
    fn needs_parse_case_insensitively() {
        assert_eq!("ELDERLY".parse::<SpecialNeeds>().unwrap(), SpecialNeeds::Elderly);
        assert_eq!(" sick ".parse::<SpecialNeeds>().unwrap(), SpecialNeeds::Sick);
        assert!("pregnant".parse::<SpecialNeeds>().is_err());
    }

    #[test]
    fn info_line() {
        let r = Recipient::new("Siti Aminah", "KRB-002", SpecialNeeds::Elderly, 2)
            .unwrap()
            .with_registered_at(test_time());
        assert_eq!(
            r.info(),
            "[RECIPIENT] Siti Aminah (ID: KRB-002) | Needs: Elderly | Dependents: 2 | Registered: 2024-03-01 09:15"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Any positive dependents count is accepted and stored unchanged.
        #[test]
        fn positive_dependents_are_accepted(n in 1u32..10_000) {
            let r = Recipient::new("Name", "ID-1", SpecialNeeds::General, n).unwrap();
            prop_assert_eq!(r.dependents(), n);
        }
    }
}

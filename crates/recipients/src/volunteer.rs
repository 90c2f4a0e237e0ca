use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campkitchen_core::{DomainError, DomainResult, Entity, VolunteerId};

use crate::recipient::validate_name;

/// A kitchen volunteer and the hours they have logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    id: VolunteerId,
    name: String,
    skill: String,
    hours_worked: u32,
    registered_at: DateTime<Utc>,
}

impl Volunteer {
    /// Register a volunteer. A blank skill falls back to "General".
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        skill: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = validate_name(name.into())?;
        let id = VolunteerId::new(id)?;
        let skill = skill.into().trim().to_string();
        let skill = if skill.is_empty() { "General".to_string() } else { skill };

        Ok(Self {
            id,
            name,
            skill,
            hours_worked: 0,
            registered_at: Utc::now(),
        })
    }

    pub fn with_registered_at(mut self, at: DateTime<Utc>) -> Self {
        self.registered_at = at;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skill(&self) -> &str {
        &self.skill
    }

    pub fn hours_worked(&self) -> u32 {
        self.hours_worked
    }

    pub fn log_hours(&mut self, hours: u32) -> DomainResult<()> {
        self.hours_worked = self.hours_worked.checked_add(hours).ok_or_else(|| {
            DomainError::invalid_quantity(format!("logging {hours} hours overflows the total"))
        })?;
        tracing::debug!(volunteer_id = %self.id, hours, total = self.hours_worked, "volunteer hours logged");
        Ok(())
    }

    pub fn info(&self) -> String {
        format!(
            "[VOLUNTEER] {} (ID: {}) | Skill: {} | Hours: {} | Joined: {}",
            self.name,
            self.id,
            self.skill,
            self.hours_worked,
            self.registered_at.format("%Y-%m-%d")
        )
    }
}

impl Entity for Volunteer {
    type Id = VolunteerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

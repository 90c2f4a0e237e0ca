use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campkitchen_core::{DistributionId, DomainError, DomainResult, Entity, RecipientId};

/// Build the id of a distribution: `DIST-<YYYYMMDDHHMMSS>-<recipientId>`.
///
/// Second resolution: two distributions to the same recipient within one
/// second produce the same id.
pub fn distribution_id_for(
    recipient_id: &RecipientId,
    at: DateTime<Utc>,
) -> DomainResult<DistributionId> {
    DistributionId::new(format!("DIST-{}-{}", at.format("%Y%m%d%H%M%S"), recipient_id))
}

/// Immutable receipt of a completed distribution. Only the note may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRecord {
    id: DistributionId,
    recipient_id: RecipientId,
    portions: u32,
    distributed_at: DateTime<Utc>,
    note: Option<String>,
}

impl DistributionRecord {
    /// The recipient is not checked for existence here; the engine does that
    /// before building a record.
    pub fn new(
        id: DistributionId,
        recipient_id: RecipientId,
        portions: u32,
        distributed_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if portions < 1 {
            return Err(DomainError::InvalidPortionCount(portions));
        }
        Ok(Self {
            id,
            recipient_id,
            portions,
            distributed_at,
            note: None,
        })
    }

    pub fn id_typed(&self) -> &DistributionId {
        &self.id
    }

    pub fn recipient_id(&self) -> &RecipientId {
        &self.recipient_id
    }

    pub fn portions(&self) -> u32 {
        self.portions
    }

    pub fn distributed_at(&self) -> DateTime<Utc> {
        self.distributed_at
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Blank notes clear the field.
    pub fn set_note(&mut self, note: impl Into<String>) {
        let note = note.into();
        let note = note.trim();
        self.note = if note.is_empty() { None } else { Some(note.to_string()) };
    }

    pub fn info(&self) -> String {
        let mut info = format!(
            "Distribution {} | Recipient: {} | Portions: {} | Time: {}",
            self.id,
            self.recipient_id,
            self.portions,
            self.distributed_at.format("%Y-%m-%d %H:%M")
        );
        if let Some(note) = &self.note {
            info.push_str(" | Note: ");
            info.push_str(note);
        }
        info
    }
}

impl Entity for DistributionRecord {
    type Id = DistributionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

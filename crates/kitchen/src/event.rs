use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campkitchen_core::{DistributionId, RecipientId};
use campkitchen_events::Event;

/// Observable facts emitted by the kitchen engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KitchenEvent {
    /// Stock was taken in. `merged` is true when it topped up an existing item.
    StockReceived {
        name: String,
        quantity: f64,
        total: f64,
        merged: bool,
        occurred_at: DateTime<Utc>,
    },
    /// An item ended an intake below the low-stock warning level.
    LowStock {
        name: String,
        quantity: f64,
        threshold: f64,
        occurred_at: DateTime<Utc>,
    },
    RecipientRegistered {
        recipient_id: RecipientId,
        dependents: u32,
        occurred_at: DateTime<Utc>,
    },
    /// A distribution completed. `deducted_from` names the staple debited,
    /// if any qualified.
    Distributed {
        distribution_id: DistributionId,
        recipient_id: RecipientId,
        portions: u32,
        deducted_from: Option<String>,
        occurred_at: DateTime<Utc>,
    },
}

impl Event for KitchenEvent {
    fn event_type(&self) -> &'static str {
        match self {
            KitchenEvent::StockReceived { .. } => "kitchen.stock.received",
            KitchenEvent::LowStock { .. } => "kitchen.stock.low",
            KitchenEvent::RecipientRegistered { .. } => "kitchen.recipient.registered",
            KitchenEvent::Distributed { .. } => "kitchen.distribution.completed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            KitchenEvent::StockReceived { occurred_at, .. }
            | KitchenEvent::LowStock { occurred_at, .. }
            | KitchenEvent::RecipientRegistered { occurred_at, .. }
            | KitchenEvent::Distributed { occurred_at, .. } => *occurred_at,
        }
    }
}

use chrono::{DateTime, Utc};

use campkitchen_core::{DomainError, DomainResult, RecipientId};
use campkitchen_distribution::{DistributionRecord, distribution_id_for};
use campkitchen_events::EventBus;
use campkitchen_infra::{
    DistributionStore, InMemoryDistributionRepository, InMemoryRecipientRepository,
    InMemoryStockRepository, RecipientStore, StockStore,
};
use campkitchen_recipients::{Recipient, SpecialNeeds};
use campkitchen_stock::StockItem;

use crate::config::KitchenConfig;
use crate::event::KitchenEvent;
use crate::report::{DistributionReport, NutritionStatus, RecipientReport, StockReport};

/// Engine wired to the in-memory repositories.
pub type InMemoryKitchen<B> = KitchenEngine<
    InMemoryStockRepository,
    InMemoryRecipientRepository,
    InMemoryDistributionRepository,
    B,
>;

/// Business rules of the camp kitchen.
///
/// The engine owns no entities itself: every read and write goes through the
/// three store traits, so any backing store can be substituted. Mutating
/// operations take `&mut self`, which makes each of them (notably the
/// read-check-deduct-record sequence of [`KitchenEngine::distribute`])
/// exclusive for its whole duration.
#[derive(Debug)]
pub struct KitchenEngine<S, R, D, B> {
    config: KitchenConfig,
    stock: S,
    recipients: R,
    distributions: D,
    bus: B,
}

impl<B> InMemoryKitchen<B>
where
    B: EventBus<KitchenEvent>,
{
    pub fn in_memory(config: KitchenConfig, bus: B) -> Self {
        Self::new(
            config,
            InMemoryStockRepository::new(),
            InMemoryRecipientRepository::new(),
            InMemoryDistributionRepository::new(),
            bus,
        )
    }
}

impl<S, R, D, B> KitchenEngine<S, R, D, B>
where
    S: StockStore,
    R: RecipientStore,
    D: DistributionStore,
    B: EventBus<KitchenEvent>,
{
    pub fn new(config: KitchenConfig, stock: S, recipients: R, distributions: D, bus: B) -> Self {
        tracing::info!(?config, "kitchen engine initialized");
        Self {
            config,
            stock,
            recipients,
            distributions,
            bus,
        }
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// Take stock in. An item whose name is already stored is topped up
    /// instead of inserted; the stored (possibly merged) item is returned.
    ///
    /// Units are not reconciled on merge: a mismatch is only logged.
    pub fn add_stock_item(&mut self, item: StockItem) -> DomainResult<StockItem> {
        if item.quantity() <= 0.0 {
            return Err(DomainError::invalid_quantity(format!(
                "stock intake for '{}' must be positive, got {}",
                item.name(),
                item.quantity()
            )));
        }

        let key = item.name().to_string();
        let (stored, merged) = match self.stock.get(&key) {
            Some(mut existing) => {
                if existing.unit() != item.unit() {
                    tracing::warn!(
                        item = %key,
                        stored_unit = existing.unit(),
                        incoming_unit = item.unit(),
                        "merging stock with mismatched units"
                    );
                }
                existing.add_stock(item.quantity())?;
                if !self.stock.update(existing.clone()) {
                    return Err(DomainError::validation(format!(
                        "stock item '{key}' disappeared during merge"
                    )));
                }
                (existing, true)
            }
            None => {
                self.stock.add(item.clone())?;
                (item.clone(), false)
            }
        };

        tracing::info!(item = %key, added = item.quantity(), total = stored.quantity(), merged, "stock received");
        let now = Utc::now();
        self.publish(KitchenEvent::StockReceived {
            name: key.clone(),
            quantity: item.quantity(),
            total: stored.quantity(),
            merged,
            occurred_at: now,
        });

        if stored.quantity() < self.config.low_stock_warning {
            tracing::warn!(
                item = %key,
                quantity = stored.quantity(),
                threshold = self.config.low_stock_warning,
                "stock is low"
            );
            self.publish(KitchenEvent::LowStock {
                name: key,
                quantity: stored.quantity(),
                threshold: self.config.low_stock_warning,
                occurred_at: now,
            });
        }

        Ok(stored)
    }

    /// Drop an item from the store entirely.
    pub fn remove_stock_item(&mut self, name: &str) -> bool {
        let removed = self.stock.delete(&name.to_string());
        if removed {
            tracing::info!(item = %name, "stock item removed");
        }
        removed
    }

    pub fn stock_item(&self, name: &str) -> Option<StockItem> {
        self.stock.get(&name.to_string())
    }

    /// Register a recipient. An existing id is rejected and left untouched.
    pub fn register_recipient(&mut self, recipient: Recipient) -> DomainResult<()> {
        if self.recipients.contains(recipient.id_typed()) {
            return Err(DomainError::duplicate_id(recipient.id_typed().as_str()));
        }

        let recipient_id = recipient.id_typed().clone();
        let dependents = recipient.dependents();
        self.recipients.add(recipient)?;

        tracing::info!(recipient_id = %recipient_id, dependents, "recipient registered");
        self.publish(KitchenEvent::RecipientRegistered {
            recipient_id,
            dependents,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// `RecipientNotFound` for unknown ids, blank ones included.
    pub fn recipient(&self, recipient_id: &str) -> DomainResult<Recipient> {
        let id = registered_id(recipient_id)?;
        self.recipients
            .get(&id)
            .ok_or_else(|| DomainError::recipient_not_found(id.as_str()))
    }

    pub fn recipients_with_needs(&self, needs: SpecialNeeds) -> Vec<Recipient> {
        let mut found = self.recipients.by_needs(needs);
        found.sort_by(|a, b| a.id_typed().cmp(b.id_typed()));
        found
    }

    /// Change a household's dependents count.
    pub fn update_dependents(&mut self, recipient_id: &str, dependents: u32) -> DomainResult<Recipient> {
        let mut recipient = self.recipient(recipient_id)?;
        recipient.set_dependents(dependents)?;
        if !self.recipients.update(recipient.clone()) {
            return Err(DomainError::recipient_not_found(recipient_id));
        }
        Ok(recipient)
    }

    /// Portions the kitchen can serve right now.
    ///
    /// A meal needs every tracked category, so availability is the minimum
    /// across items (the bottleneck), or 0 with no stock at all.
    pub fn compute_available_portions(&self) -> u64 {
        self.stock
            .list()
            .iter()
            .map(StockItem::compute_portions)
            .min()
            .unwrap_or(0)
    }

    /// Hand `portions` to a registered recipient, now.
    pub fn distribute(&mut self, recipient_id: &str, portions: u32) -> DomainResult<DistributionRecord> {
        self.distribute_at(recipient_id, portions, None, Utc::now())
    }

    /// Hand `portions` to a registered recipient at business time `at`.
    ///
    /// Every check runs before anything is written, so a failed call leaves
    /// stock, recipients and records exactly as they were.
    ///
    /// Only staple stock is debited (`portions * staple_kg_per_distributed_portion`
    /// from the first staple, in intake order, that can cover it). Protein and
    /// vegetables bound availability but are never decremented; when no staple
    /// covers the amount nothing is debited.
    pub fn distribute_at(
        &mut self,
        recipient_id: &str,
        portions: u32,
        note: Option<&str>,
        at: DateTime<Utc>,
    ) -> DomainResult<DistributionRecord> {
        let recipient = self.recipient(recipient_id)?;
        let rid = recipient.id_typed().clone();

        let available = self.compute_available_portions();
        if u64::from(portions) > available {
            return Err(DomainError::insufficient_portions(u64::from(portions), available));
        }

        let id = distribution_id_for(&rid, at)?;
        let mut record = DistributionRecord::new(id, rid.clone(), portions, at)?;
        if let Some(note) = note {
            record.set_note(note);
        }
        if self.distributions.contains(record.id_typed()) {
            return Err(DomainError::duplicate_id(record.id_typed().as_str()));
        }

        let deducted_from = self.deduct_staple(portions)?;
        self.distributions.add(record.clone())?;

        tracing::info!(
            distribution_id = %record.id_typed(),
            recipient_id = %rid,
            recipient = recipient.name(),
            portions,
            deducted_from = deducted_from.as_deref().unwrap_or("-"),
            "distribution completed"
        );
        self.publish(KitchenEvent::Distributed {
            distribution_id: record.id_typed().clone(),
            recipient_id: rid,
            portions,
            deducted_from,
            occurred_at: at,
        });

        Ok(record)
    }

    pub fn distributions_for(&self, recipient_id: &str) -> DomainResult<Vec<DistributionRecord>> {
        let id = registered_id(recipient_id)?;
        let mut history = self.distributions.by_recipient(&id);
        history.sort_by_key(|d| d.distributed_at());
        Ok(history)
    }

    pub fn stock_report(&self) -> StockReport {
        let mut items = self.stock.list();
        items.sort_by(|a, b| a.name().cmp(b.name()));

        let mut low = self.stock.low_stock(self.config.low_stock_report_threshold);
        low.sort_by(|a, b| a.name().cmp(b.name()));

        StockReport {
            total_items: items.len(),
            total_available_portions: self.compute_available_portions(),
            low_stock_count: low.len(),
            items: items.iter().map(StockItem::info).collect(),
            low_stock_names: low.iter().map(|i| i.name().to_string()).collect(),
        }
    }

    pub fn recipient_report(&self) -> RecipientReport {
        let mut recipients = self.recipients.list();
        recipients.sort_by(|a, b| a.id_typed().cmp(b.id_typed()));

        RecipientReport {
            total_recipients: recipients.len(),
            total_dependents: self.recipients.total_dependents(),
            recipients: recipients.iter().map(Recipient::info).collect(),
        }
    }

    pub fn distribution_report(&self) -> DistributionReport {
        let mut records = self.distributions.list();
        records.sort_by(|a, b| {
            a.distributed_at()
                .cmp(&b.distributed_at())
                .then_with(|| a.id_typed().cmp(b.id_typed()))
        });

        DistributionReport {
            total_distributions: records.len(),
            total_portions_distributed: self.distributions.total_portions(),
            distributions: records.iter().map(DistributionRecord::info).collect(),
        }
    }

    /// How many days current stock feeds every registered dependent.
    pub fn nutrition_status(&self) -> NutritionStatus {
        NutritionStatus::project(
            self.recipients.total_dependents(),
            self.compute_available_portions(),
            &self.config,
        )
    }

    /// Debit the staple share of a distribution. Returns the debited item's
    /// name, or `None` when no staple holds enough.
    fn deduct_staple(&mut self, portions: u32) -> DomainResult<Option<String>> {
        let needed = f64::from(portions) * self.config.staple_kg_per_distributed_portion;

        let mut staples: Vec<StockItem> = self
            .stock
            .list()
            .into_iter()
            .filter(|item| item.category().is_staple())
            .collect();
        staples.sort_by(|a, b| {
            a.received_at()
                .cmp(&b.received_at())
                .then_with(|| a.name().cmp(b.name()))
        });

        let Some(mut staple) = staples.into_iter().find(|item| item.quantity() >= needed) else {
            tracing::debug!(needed_kg = needed, "no staple covers the distribution; nothing debited");
            return Ok(None);
        };

        staple.remove_stock(needed)?;
        let name = staple.name().to_string();
        if !self.stock.update(staple) {
            return Err(DomainError::validation(format!(
                "stock item '{name}' disappeared during deduction"
            )));
        }
        Ok(Some(name))
    }

    fn publish(&self, event: KitchenEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!(?err, "failed to publish kitchen event");
        }
    }
}

/// A blank id can never name a registered recipient.
fn registered_id(recipient_id: &str) -> DomainResult<RecipientId> {
    RecipientId::new(recipient_id).map_err(|_| DomainError::recipient_not_found(recipient_id))
}

//! Domain-specific queries on top of [`Repository`].

use campkitchen_core::RecipientId;
use campkitchen_distribution::DistributionRecord;
use campkitchen_recipients::{Recipient, SpecialNeeds};
use campkitchen_stock::StockItem;

use super::{InMemoryRepository, Repository};

pub type InMemoryStockRepository = InMemoryRepository<StockItem>;
pub type InMemoryRecipientRepository = InMemoryRepository<Recipient>;
pub type InMemoryDistributionRepository = InMemoryRepository<DistributionRecord>;

pub trait StockStore: Repository<StockItem> {
    /// Items whose quantity is strictly below `threshold`.
    fn low_stock(&self, threshold: f64) -> Vec<StockItem>;
}

pub trait RecipientStore: Repository<Recipient> {
    fn by_needs(&self, needs: SpecialNeeds) -> Vec<Recipient>;

    /// Sum of dependents across every registered recipient.
    fn total_dependents(&self) -> u64;
}

pub trait DistributionStore: Repository<DistributionRecord> {
    /// Distribution history of one recipient.
    fn by_recipient(&self, recipient_id: &RecipientId) -> Vec<DistributionRecord>;

    /// Portions handed out across every record.
    fn total_portions(&self) -> u64;
}

impl StockStore for InMemoryStockRepository {
    fn low_stock(&self, threshold: f64) -> Vec<StockItem> {
        self.values()
            .filter(|item| item.quantity() < threshold)
            .cloned()
            .collect()
    }
}

impl RecipientStore for InMemoryRecipientRepository {
    fn by_needs(&self, needs: SpecialNeeds) -> Vec<Recipient> {
        self.values().filter(|r| r.needs() == needs).cloned().collect()
    }

    fn total_dependents(&self) -> u64 {
        self.values().map(|r| u64::from(r.dependents())).sum()
    }
}

impl DistributionStore for InMemoryDistributionRepository {
    fn by_recipient(&self, recipient_id: &RecipientId) -> Vec<DistributionRecord> {
        self.values()
            .filter(|d| d.recipient_id() == recipient_id)
            .cloned()
            .collect()
    }

    fn total_portions(&self) -> u64 {
        self.values().map(|d| u64::from(d.portions())).sum()
    }
}

//! Keyed entity collections.

pub mod in_memory;
pub mod stores;

pub use in_memory::InMemoryRepository;
pub use stores::{
    DistributionStore, InMemoryDistributionRepository, InMemoryRecipientRepository,
    InMemoryStockRepository, RecipientStore, StockStore,
};

use campkitchen_core::{DomainResult, Entity};

/// Key/value collection abstraction for one entity type.
///
/// `get`/`list` hand out clones: callers mutate a copy and write it back with
/// `update`, so the store stays the single owner of what is persisted.
pub trait Repository<V: Entity> {
    /// Insert a new entity. Fails with `DuplicateId` if the key is taken.
    fn add(&mut self, entity: V) -> DomainResult<()>;

    fn get(&self, id: &V::Id) -> Option<V>;

    /// All entities, in no particular order.
    fn list(&self) -> Vec<V>;

    /// Replace an existing entity. Returns `false` if the key is unknown.
    fn update(&mut self, entity: V) -> bool;

    /// Returns `false` if the key is unknown.
    fn delete(&mut self, id: &V::Id) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: &V::Id) -> bool {
        self.get(id).is_some()
    }
}

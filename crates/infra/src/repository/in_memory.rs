use std::collections::HashMap;
use std::fmt::Display;

use campkitchen_core::{DomainError, DomainResult, Entity};

use super::Repository;

/// In-memory store keyed by entity id.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<V: Entity> {
    inner: HashMap<V::Id, V>,
}

impl<V: Entity> InMemoryRepository<V> {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Read-only iteration for the domain-specific query helpers.
    pub(crate) fn values(&self) -> impl Iterator<Item = &V> {
        self.inner.values()
    }
}

impl<V: Entity> Default for InMemoryRepository<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Repository<V> for InMemoryRepository<V>
where
    V: Entity + Clone,
    V::Id: Display,
{
    fn add(&mut self, entity: V) -> DomainResult<()> {
        let id = entity.id().clone();
        if self.inner.contains_key(&id) {
            return Err(DomainError::duplicate_id(id.to_string()));
        }
        tracing::debug!(id = %id, "entity added");
        self.inner.insert(id, entity);
        Ok(())
    }

    fn get(&self, id: &V::Id) -> Option<V> {
        self.inner.get(id).cloned()
    }

    fn list(&self) -> Vec<V> {
        self.inner.values().cloned().collect()
    }

    fn update(&mut self, entity: V) -> bool {
        match self.inner.get_mut(entity.id()) {
            Some(slot) => {
                tracing::debug!(id = %entity.id(), "entity updated");
                *slot = entity;
                true
            }
            None => {
                tracing::debug!(id = %entity.id(), "update skipped: unknown id");
                false
            }
        }
    }

    fn delete(&mut self, id: &V::Id) -> bool {
        let removed = self.inner.remove(id).is_some();
        tracing::debug!(id = %id, removed, "entity delete");
        removed
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn contains(&self, id: &V::Id) -> bool {
        self.inner.contains_key(id)
    }
}

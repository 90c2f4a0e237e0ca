//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Storage collections key entities by `id()`; two entities with the same id
/// are the same stored record, whatever their other fields hold.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

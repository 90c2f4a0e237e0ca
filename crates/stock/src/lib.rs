//! Kitchen stock domain.
//!
//! Stock entries and their conversion into servable portions, implemented as
//! deterministic domain logic (no IO, no storage).

pub mod item;

pub use item::{
    DEFAULT_PROTEIN_KG_PER_PORTION, DEFAULT_STAPLE_GRAMS_PER_PORTION,
    DEFAULT_VEGETABLE_KG_PER_PORTION, StockCategory, StockItem, StockKind,
};

//! Storage collections for the kitchen.
//!
//! The engine only talks to the traits in [`repository`]; the in-memory
//! implementations here are the default backing store.

pub mod repository;

pub use repository::{
    DistributionStore, InMemoryDistributionRepository, InMemoryRecipientRepository,
    InMemoryRepository, InMemoryStockRepository, RecipientStore, Repository, StockStore,
};

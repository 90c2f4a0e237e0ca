//! Domain events and the sink they are published to.
//!
//! Mechanics only: domain crates define their own event enums and implement
//! [`Event`] for them.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus, NoopEventBus};

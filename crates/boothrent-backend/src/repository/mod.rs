//! Repository Layer
//!
//! The contract traits the application programs against, the listener
//! registry behind every live query, and the in-memory implementation.

mod listeners;
mod memory;
mod tests;
mod traits;

pub(crate) use listeners::locked;
pub use listeners::{ListenerSet, Subscription};
pub use memory::{InMemoryDb, SeedData};
pub use traits::{
    BusinessStore, CloudStore, EventStore, LedgerStore, PurgeOutcome, ReminderCallback,
    RenterCallback, RenterFilter, RenterStore,
};

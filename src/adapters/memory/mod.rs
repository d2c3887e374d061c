//! In-memory adapters.

mod store;

pub use store::{InMemoryStore, InMemoryTransaction};

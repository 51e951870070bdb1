//! Read-only entity store: the loaded dataset plus the lookups the analyst
//! needs (by id, by foreign key) and the relationship accessors built on them.
//!
//! Records are loaded once from a [`Snapshot`] and never mutated. Reloading
//! means building a new store and swapping it in through a [`SnapshotCell`].

pub mod entity_store;
pub mod in_memory;
pub mod relations;
pub mod snapshot;

pub use entity_store::EntityStore;
pub use in_memory::InMemoryEntityStore;
pub use snapshot::{load_json, Snapshot, SnapshotCell, StoreError};

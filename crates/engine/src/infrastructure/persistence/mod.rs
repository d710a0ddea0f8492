//! Character store adapters
//!
//! SQLite for the durable on-device store, and an in-memory store for tests
//! and throwaway sessions. Both honor the `CharacterStore` contract.

mod memory_store;
mod sqlite_store;

pub use memory_store::InMemoryCharacterStore;
pub use sqlite_store::SqliteCharacterStore;

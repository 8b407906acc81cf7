//! In-memory store backend for the rotomdex server.
//!
//! Implements the `PokedexStorage` trait from `rotomdex-storage` on sharded
//! concurrent maps. Suitable for tests and single-process deployments; all
//! state is lost on shutdown.
//!
//! # Example
//!
//! ```ignore
//! use rotomdex_db_memory::MemoryStorage;
//! use rotomdex_storage::PokedexStorage;
//!
//! let storage = MemoryStorage::new();
//! let hit = storage.find_pokemon_by_id(25).await?;
//! ```

mod storage;

pub use storage::MemoryStorage;

// Re-export the gateway trait for convenience
pub use rotomdex_storage::{PokedexStorage, StorageError};

/// Creates a new shareable in-memory storage instance.
#[must_use]
pub fn create_storage() -> rotomdex_storage::DynStorage {
    std::sync::Arc::new(MemoryStorage::new())
}

//! # rotomdex-storage
//!
//! Local store gateway for the rotomdex server.
//!
//! This crate defines the trait and envelope types every store backend
//! implements. It contains no backend itself; `rotomdex-db-memory`
//! provides the in-process one.

mod error;
mod traits;
mod types;

pub use error::StorageError;
pub use traits::PokedexStorage;
pub use types::{POKEMON_SCHEMA_VERSION, RecordOrigin, StoredGame, StoredPokemon};

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shared storage trait object.
pub type DynStorage = std::sync::Arc<dyn PokedexStorage>;

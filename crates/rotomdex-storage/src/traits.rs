//! The gateway contract every store backend implements.

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use rotomdex_core::{GameRecord, PokemonRecord, UserIdentity};

use crate::error::StorageError;
use crate::types::{StoredGame, StoredPokemon};

/// CRUD over the three collections (Pokémon, games, users).
///
/// Pokémon entries are keyed by their domain `id`, never by a
/// store-generated key; games and users carry generated UUIDs.
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait PokedexStorage: Send + Sync {
    // ==================== Pokémon ====================

    /// Looks up a Pokémon entry by its domain id.
    ///
    /// Returns `None` when no entry exists; the caller decides whether
    /// that is a cache miss or a 404.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures, not for misses.
    async fn find_pokemon_by_id(&self, id: u32) -> Result<Option<StoredPokemon>, StorageError>;

    /// Replace-or-insert keyed by `entry.record.id`.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn upsert_pokemon(&self, entry: StoredPokemon) -> Result<(), StorageError>;

    /// Every record in the Pokémon collection. Full scan; iteration order
    /// carries no meaning.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn list_custom_pokemon(&self) -> Result<Vec<PokemonRecord>, StorageError>;

    /// Replaces the fields of an existing entry. Succeeds without effect
    /// when nothing matched. An explicit edit makes the entry
    /// client-origin at the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn update_pokemon_by_id(&self, id: u32, record: PokemonRecord)
    -> Result<(), StorageError>;

    /// Removes an entry by id. Idempotent: succeeds when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn delete_pokemon_by_id(&self, id: u32) -> Result<(), StorageError>;

    /// Client submission, optionally linked to an owning user, as one
    /// gateway call: upserts the record and sets the owner's `pokedex`
    /// back-reference. When the linkage cannot be made the Pokémon write
    /// is rolled back, so a failed call leaves no partial state.
    ///
    /// Returns the record as stored (with `owner` set when linked).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when `owner` names an unknown
    /// user; backend errors otherwise.
    async fn add_pokemon_for_user(
        &self,
        record: PokemonRecord,
        owner: Option<Uuid>,
    ) -> Result<PokemonRecord, StorageError>;

    // ==================== Users ====================

    /// Looks up an identity by email.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn find_user_by_email(&self, email: &str)
    -> Result<Option<UserIdentity>, StorageError>;

    /// Login upsert: inserts a fresh identity stamped `now` when the email
    /// is unknown, else updates `lastLogin` only. At most one identity per
    /// email ever exists.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn upsert_login_by_email(
        &self,
        email: &str,
        now: OffsetDateTime,
    ) -> Result<UserIdentity, StorageError>;

    // ==================== Games ====================

    /// All catalog games, ordered by ascending `generation`.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn list_games(&self) -> Result<Vec<StoredGame>, StorageError>;

    /// Looks up a game by its generated id.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn get_game(&self, id: Uuid) -> Result<Option<StoredGame>, StorageError>;

    /// Inserts a new game under a fresh id and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    async fn create_game(&self, game: GameRecord) -> Result<StoredGame, StorageError>;

    /// Replaces an existing game's record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the id matches nothing.
    async fn update_game(&self, id: Uuid, game: GameRecord) -> Result<StoredGame, StorageError>;

    /// Deletes a game.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the id matches nothing.
    async fn delete_game(&self, id: Uuid) -> Result<(), StorageError>;

    // ==================== Metadata ====================

    /// Name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

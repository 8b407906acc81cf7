//! Concurrent-map implementation of the store gateway.

use async_trait::async_trait;
use dashmap::DashMap;
use time::OffsetDateTime;
use uuid::Uuid;

use rotomdex_core::{GameRecord, PokemonRecord, UserIdentity};
use rotomdex_storage::{PokedexStorage, StorageError, StoredGame, StoredPokemon};

/// In-process store: one sharded map per collection.
///
/// Pokémon entries are keyed by domain id, games by their generated UUID,
/// users by email (the unique key the login upsert works against).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pokemon: DashMap<u32, StoredPokemon>,
    games: DashMap<Uuid, StoredGame>,
    users: DashMap<String, UserIdentity>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn find_user_by_id(&self, id: Uuid) -> Option<String> {
        self.users
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.key().clone())
    }
}

#[async_trait]
impl PokedexStorage for MemoryStorage {
    async fn find_pokemon_by_id(&self, id: u32) -> Result<Option<StoredPokemon>, StorageError> {
        Ok(self.pokemon.get(&id).map(|entry| entry.clone()))
    }

    async fn upsert_pokemon(&self, entry: StoredPokemon) -> Result<(), StorageError> {
        self.pokemon.insert(entry.record.id, entry);
        Ok(())
    }

    async fn list_custom_pokemon(&self) -> Result<Vec<PokemonRecord>, StorageError> {
        Ok(self
            .pokemon
            .iter()
            .map(|entry| entry.value().record.clone())
            .collect())
    }

    async fn update_pokemon_by_id(
        &self,
        id: u32,
        mut record: PokemonRecord,
    ) -> Result<(), StorageError> {
        // The path id is authoritative; a body carrying a different id must
        // not make the stored record diverge from its key.
        record.id = id;
        if let Some(mut entry) = self.pokemon.get_mut(&id) {
            *entry = StoredPokemon::from_client(record);
        }
        Ok(())
    }

    async fn delete_pokemon_by_id(&self, id: u32) -> Result<(), StorageError> {
        self.pokemon.remove(&id);
        Ok(())
    }

    async fn add_pokemon_for_user(
        &self,
        mut record: PokemonRecord,
        owner: Option<Uuid>,
    ) -> Result<PokemonRecord, StorageError> {
        if let Some(owner_id) = owner {
            record.owner = Some(owner_id);
        }
        let id = record.id;
        let previous = self
            .pokemon
            .insert(id, StoredPokemon::from_client(record.clone()));

        if let Some(owner_id) = owner {
            let Some(email) = self.find_user_by_id(owner_id) else {
                // Unwind the write so a failed linkage leaves no trace.
                match previous {
                    Some(prev) => {
                        self.pokemon.insert(id, prev);
                    }
                    None => {
                        self.pokemon.remove(&id);
                    }
                }
                return Err(StorageError::not_found("User", owner_id.to_string()));
            };
            if let Some(mut user) = self.users.get_mut(&email) {
                user.pokedex = Some(id);
            }
        }

        Ok(record)
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserIdentity>, StorageError> {
        Ok(self.users.get(email).map(|entry| entry.clone()))
    }

    async fn upsert_login_by_email(
        &self,
        email: &str,
        now: OffsetDateTime,
    ) -> Result<UserIdentity, StorageError> {
        let user = self
            .users
            .entry(email.to_string())
            .and_modify(|user| user.last_login = now)
            .or_insert_with(|| UserIdentity::new(email, now))
            .clone();
        Ok(user)
    }

    async fn list_games(&self) -> Result<Vec<StoredGame>, StorageError> {
        let mut games: Vec<StoredGame> = self
            .games
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        games.sort_by_key(|stored| stored.game.generation);
        Ok(games)
    }

    async fn get_game(&self, id: Uuid) -> Result<Option<StoredGame>, StorageError> {
        Ok(self.games.get(&id).map(|entry| entry.clone()))
    }

    async fn create_game(&self, game: GameRecord) -> Result<StoredGame, StorageError> {
        let stored = StoredGame::new(game);
        self.games.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_game(&self, id: Uuid, game: GameRecord) -> Result<StoredGame, StorageError> {
        match self.games.get_mut(&id) {
            Some(mut entry) => {
                entry.game = game;
                Ok(entry.clone())
            }
            None => Err(StorageError::not_found("Game", id.to_string())),
        }
    }

    async fn delete_game(&self, id: Uuid) -> Result<(), StorageError> {
        match self.games.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StorageError::not_found("Game", id.to_string())),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

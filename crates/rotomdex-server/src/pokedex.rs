//! Read-through orchestration between the local store and the upstream API.

use futures_util::future::try_join_all;

use rotomdex_core::{PokemonRecord, PokemonSummary};
use rotomdex_storage::{DynStorage, PokedexStorage, StoredPokemon};
use rotomdex_upstream::{DynPokeApi, ImageBases, normalize};

use crate::error::ApiError;

/// Serves Pokémon reads by merging the local store with the upstream API.
///
/// Detail reads are local-first: a fresh stored entry short-circuits the
/// upstream entirely. On a miss (or a stale system entry) the detail and
/// species payloads are fetched concurrently, normalized, written back,
/// and served. Index reads fan out over the species list and append the
/// locally stored records afterwards.
pub struct Pokedex {
    api: DynPokeApi,
    storage: DynStorage,
    images: ImageBases,
    list_limit: u32,
}

impl Pokedex {
    #[must_use]
    pub fn new(api: DynPokeApi, storage: DynStorage, images: ImageBases, list_limit: u32) -> Self {
        Self {
            api,
            storage,
            images,
            list_limit,
        }
    }

    /// Produces the full record for one Pokémon id.
    ///
    /// Upstream failures and unusable payloads surface as
    /// [`ApiError::PokemonNotFound`]; a stale stored entry is never served
    /// in their place. Store failures surface as [`ApiError::Internal`].
    pub async fn pokemon_detail(&self, id: u32) -> Result<PokemonRecord, ApiError> {
        if let Some(entry) = self.storage.find_pokemon_by_id(id).await? {
            if entry.is_fresh() {
                tracing::debug!(id, "pokemon served from local store");
                return Ok(entry.record);
            }
            tracing::debug!(
                id,
                stamped = entry.schema_version,
                "stored pokemon is stale, refreshing from upstream"
            );
        }

        let key = id.to_string();
        let (detail, species) =
            tokio::try_join!(self.api.fetch_pokemon(&key), self.api.fetch_species(&key))
                .map_err(|err| ApiError::pokemon_not_found(err.to_string()))?;

        let record = normalize(detail, species, &self.images)
            .map_err(|err| ApiError::pokemon_not_found(err.to_string()))?;

        self.storage
            .upsert_pokemon(StoredPokemon::from_upstream(record.clone()))
            .await?;
        tracing::debug!(id, name = %record.name, "pokemon written back from upstream");

        Ok(record)
    }

    /// Produces the index: every upstream species projected to a summary,
    /// followed by every locally stored record.
    ///
    /// The fan-out is all-or-nothing; one failed fetch fails the read.
    /// Summary ids come from the detail payloads, so they stay correct
    /// even if upstream reorders its species list.
    pub async fn pokemon_index(&self) -> Result<Vec<PokemonSummary>, ApiError> {
        let species = self
            .api
            .list_species(self.list_limit)
            .await
            .map_err(|err| ApiError::internal(err.to_string()))?;

        let details = try_join_all(
            species
                .iter()
                .map(|entry| self.api.fetch_pokemon(&entry.name)),
        )
        .await
        .map_err(|err| ApiError::internal(err.to_string()))?;

        let mut index: Vec<PokemonSummary> = details
            .into_iter()
            .map(|detail| PokemonSummary {
                image: self.images.url_for(detail.id),
                id: detail.id,
                name: detail.name,
            })
            .collect();

        let local = self.storage.list_custom_pokemon().await?;
        index.extend(local.iter().map(PokemonRecord::summary));

        tracing::debug!(total = index.len(), "pokemon index assembled");
        Ok(index)
    }
}

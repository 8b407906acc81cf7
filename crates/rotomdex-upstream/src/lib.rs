//! Upstream API client and payload normalization.
//!
//! This crate owns everything that talks to the remote Pokémon API:
//! the read-only [`PokeApi`] trait with its reqwest-backed client, the
//! raw wire payload types, and the normalizer that shapes those
//! payloads into canonical [`rotomdex_core::PokemonRecord`] values.

mod client;
mod error;
mod normalize;
mod types;

pub use client::{PokeApi, PokeApiClient, UpstreamConfig};
pub use error::UpstreamError;
pub use normalize::{ImageBases, MISSING_FLAVOR_TEXT, NormalizeError, normalize};
pub use types::{
    AbilitySlot, FlavorTextEntry, NamedResource, PokemonDetail, PokemonSpecies, SpeciesPage,
    StatValue, TypeSlot,
};

/// Shared handle to a dynamic upstream client.
pub type DynPokeApi = std::sync::Arc<dyn PokeApi>;

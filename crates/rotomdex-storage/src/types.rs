//! Stored-entry envelopes: the payload plus the bookkeeping the store
//! keeps alongside it. Envelope metadata never reaches API clients.

use rotomdex_core::{GameRecord, PokemonRecord};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Schema version stamped onto Pokémon entries at write time.
///
/// Bump this when the normalized record gains required fields; stamped
/// entries from before the bump stop counting as cache hits and get
/// re-fetched from upstream. Version 1 predates flavor text and evolution
/// lineage; version 2 is the current shape.
pub const POKEMON_SCHEMA_VERSION: u32 = 2;

/// Where a stored Pokémon entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordOrigin {
    /// Written back after an upstream fetch; subject to re-fetch when its
    /// schema stamp falls behind.
    Upstream,
    /// Submitted or edited by a client; authoritative, never re-fetched.
    Client,
}

/// A Pokémon record as the store holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPokemon {
    pub record: PokemonRecord,
    pub origin: RecordOrigin,
    pub schema_version: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl StoredPokemon {
    /// Envelope for an upstream write-back, stamped with the current
    /// schema version.
    #[must_use]
    pub fn from_upstream(record: PokemonRecord) -> Self {
        Self {
            record,
            origin: RecordOrigin::Upstream,
            schema_version: POKEMON_SCHEMA_VERSION,
            last_updated: OffsetDateTime::now_utc(),
        }
    }

    /// Envelope for a client submission or edit.
    #[must_use]
    pub fn from_client(record: PokemonRecord) -> Self {
        Self {
            record,
            origin: RecordOrigin::Client,
            schema_version: POKEMON_SCHEMA_VERSION,
            last_updated: OffsetDateTime::now_utc(),
        }
    }

    /// Whether this entry satisfies the cache-hit condition.
    ///
    /// Client entries are always fresh: they are local truth, and their ids
    /// may not even exist upstream. Upstream entries are fresh only while
    /// their stamp matches the current schema version.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        match self.origin {
            RecordOrigin::Client => true,
            RecordOrigin::Upstream => self.schema_version == POKEMON_SCHEMA_VERSION,
        }
    }
}

/// A catalog game as the store holds it: the record plus its generated id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGame {
    pub id: Uuid,
    #[serde(flatten)]
    pub game: GameRecord,
}

impl StoredGame {
    /// Wraps a new game record under a fresh id.
    #[must_use]
    pub fn new(game: GameRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            game,
        }
    }
}

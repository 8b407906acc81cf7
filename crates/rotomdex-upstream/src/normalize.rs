//! Shapes raw upstream payloads into the canonical record form.

use rotomdex_core::{BaseStats, PokemonRecord};
use thiserror::Error;

use crate::types::{PokemonDetail, PokemonSpecies};

/// Placeholder used when a species carries no English flavor text.
pub const MISSING_FLAVOR_TEXT: &str = "No flavor text available";

/// Species numbered below this threshold use the primary artwork set.
const ALTERNATE_IMAGE_FLOOR: u32 = 1018;

/// The one species below the floor that only exists in the alternate set.
const ALTERNATE_IMAGE_EXCEPTION: u32 = 1013;

/// Errors raised while shaping an upstream payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The detail payload did not carry the six positional base stats.
    #[error("Incomplete stats for '{name}': expected 6 entries, found {found}")]
    MissingStats { name: String, found: usize },
}

/// Base URLs for the two sprite collections, resolved per species id.
#[derive(Debug, Clone)]
pub struct ImageBases {
    primary: String,
    alternate: String,
}

impl ImageBases {
    /// Creates image bases from the two collection roots. Trailing
    /// slashes are trimmed so joining stays predictable.
    #[must_use]
    pub fn new(primary: impl Into<String>, alternate: impl Into<String>) -> Self {
        Self {
            primary: primary.into().trim_end_matches('/').to_string(),
            alternate: alternate.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolves the artwork URL for a species id.
    ///
    /// Ids below 1018 live in the primary collection, except 1013 which
    /// only exists in the alternate one. Everything from 1018 up is
    /// alternate-only.
    #[must_use]
    pub fn url_for(&self, id: u32) -> String {
        if id < ALTERNATE_IMAGE_FLOOR && id != ALTERNATE_IMAGE_EXCEPTION {
            format!("{}/{id}.png", self.primary)
        } else {
            format!("{}/{id}.png", self.alternate)
        }
    }
}

/// Merges a detail payload and its species payload into a canonical
/// record.
///
/// Abilities are partitioned on the hidden flag; the first hidden one
/// becomes the record's hidden ability. Stats are positional (hp,
/// attack, defense, special attack, special defense, speed). Flavor
/// text is the first English entry with escaped line feeds and form
/// feeds stripped, or a placeholder when none exists.
///
/// # Errors
///
/// Returns [`NormalizeError::MissingStats`] when the detail payload
/// carries fewer than six stat entries.
pub fn normalize(
    detail: PokemonDetail,
    species: PokemonSpecies,
    images: &ImageBases,
) -> Result<PokemonRecord, NormalizeError> {
    if detail.stats.len() < 6 {
        return Err(NormalizeError::MissingStats {
            name: detail.name,
            found: detail.stats.len(),
        });
    }

    let stats = BaseStats::new(
        detail.stats[0].base_stat,
        detail.stats[1].base_stat,
        detail.stats[2].base_stat,
        detail.stats[3].base_stat,
        detail.stats[4].base_stat,
        detail.stats[5].base_stat,
    );

    let mut abilities = Vec::new();
    let mut hidden = Vec::new();
    for slot in detail.abilities {
        if slot.is_hidden {
            hidden.push(slot.ability.name);
        } else {
            abilities.push(slot.ability.name);
        }
    }

    let flavor_text = species
        .flavor_text_entries
        .into_iter()
        .find(|entry| entry.language.name == "en")
        .map_or_else(
            || MISSING_FLAVOR_TEXT.to_string(),
            |entry| entry.flavor_text.replace("\\n", "").replace('\u{000C}', ""),
        );

    let mut record = PokemonRecord::new(detail.id, detail.name)
        .with_types(detail.types.into_iter().map(|slot| slot.kind.name).collect())
        .with_abilities(abilities)
        .with_base_stats(stats)
        .with_image(images.url_for(detail.id))
        .with_flavor_text(flavor_text);

    if let Some(ability) = hidden.into_iter().next() {
        record = record.with_hidden_ability(ability);
    }
    if let Some(predecessor) = species.evolves_from_species {
        record = record.with_evolves_from(predecessor.name);
    }

    Ok(record)
}

//! Raw upstream payload shapes, limited to the fields this server reads.
//! Anything else in the upstream response is ignored at decode time.

use serde::Deserialize;

/// A name-only reference, the building block of every upstream payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

/// One page of the species list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesPage {
    pub count: u32,
    pub results: Vec<NamedResource>,
}

/// An ability entry on the detail payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    pub is_hidden: bool,
}

/// A type entry on the detail payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// A stat entry on the detail payload. The six entries arrive in a fixed
/// order: hp, attack, defense, special-attack, special-defense, speed.
#[derive(Debug, Clone, Deserialize)]
pub struct StatValue {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// The detail payload for a single Pokémon.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub types: Vec<TypeSlot>,
    pub abilities: Vec<AbilitySlot>,
    pub stats: Vec<StatValue>,
}

/// One entry of the species flavor-text list.
#[derive(Debug, Clone, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

/// The species payload, read for lineage and flavor text.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonSpecies {
    pub evolves_from_species: Option<NamedResource>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

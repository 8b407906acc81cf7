use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The six base stat values, in the order the upstream API delivers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    #[must_use]
    pub fn new(
        hp: u32,
        attack: u32,
        defense: u32,
        special_attack: u32,
        special_defense: u32,
        speed: u32,
    ) -> Self {
        Self {
            hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        }
    }
}

/// The canonical Pokémon record served by the API and persisted in the
/// local store.
///
/// Records come from two places: normalized upstream payloads written back
/// on a cache miss, and client submissions. `owner` is set only on the
/// latter, when the submitting client linked the record to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    /// Type names in slot order, one or two entries.
    pub types: Vec<String>,
    /// Non-hidden ability names, upstream order preserved.
    pub abilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_ability: Option<String>,
    /// Name of the predecessor species, absent for base forms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolves_from: Option<String>,
    pub base_stats: BaseStats,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,
    /// Owning user, absent for system records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Uuid>,
}

impl PokemonRecord {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            types: Vec::new(),
            abilities: Vec::new(),
            hidden_ability: None,
            evolves_from: None,
            base_stats: BaseStats::default(),
            image: String::new(),
            flavor_text: None,
            owner: None,
        }
    }

    #[must_use]
    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: Vec<String>) -> Self {
        self.abilities = abilities;
        self
    }

    #[must_use]
    pub fn with_hidden_ability(mut self, ability: impl Into<String>) -> Self {
        self.hidden_ability = Some(ability.into());
        self
    }

    #[must_use]
    pub fn with_evolves_from(mut self, species: impl Into<String>) -> Self {
        self.evolves_from = Some(species.into());
        self
    }

    #[must_use]
    pub fn with_base_stats(mut self, stats: BaseStats) -> Self {
        self.base_stats = stats;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    #[must_use]
    pub fn with_flavor_text(mut self, text: impl Into<String>) -> Self {
        self.flavor_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: Uuid) -> Self {
        self.owner = Some(owner);
        self
    }

    /// The reduced view returned by the list endpoint.
    #[must_use]
    pub fn summary(&self) -> PokemonSummary {
        PokemonSummary {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

/// Minimal projection of a record: just enough to render a list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub image: String,
}

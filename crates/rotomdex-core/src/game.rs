use serde::{Deserialize, Serialize};

/// One generation of mainline games in the catalog.
///
/// Fully client-managed; unlike [`crate::PokemonRecord`] there is no
/// upstream source for these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub generation: i32,
    /// Titles in release order.
    pub games_released: Vec<String>,
    pub platforms: String,
    pub year_released: String,
    pub region: String,
    pub well_known_pokemon: String,
    pub image: String,
}

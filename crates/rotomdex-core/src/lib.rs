pub mod game;
pub mod pokemon;
pub mod user;

pub use game::GameRecord;
pub use pokemon::{BaseStats, PokemonRecord, PokemonSummary};
pub use user::UserIdentity;

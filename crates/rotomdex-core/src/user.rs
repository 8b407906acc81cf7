use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A known user, keyed by email with upsert-on-login semantics: at most one
/// identity exists per email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Store-generated identifier, referenced by `PokemonRecord::owner`.
    pub id: Uuid,
    pub user_email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_login: OffsetDateTime,
    /// Back-reference to the one Pokémon this user has submitted, by
    /// Pokémon id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pokedex: Option<u32>,
}

impl UserIdentity {
    /// Fresh identity for a first login at `now`.
    #[must_use]
    pub fn new(email: impl Into<String>, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_email: email.into(),
            last_login: now,
            pokedex: None,
        }
    }
}

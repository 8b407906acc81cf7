//! Claims carried by an access token.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Decoded identity attached to an authenticated request.
///
/// The subject is the trainer's email address. Timestamps are seconds
/// since the Unix epoch, as required by JWT registered claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject of the token (user email).
    pub sub: String,
    /// Expiration time.
    pub exp: i64,
    /// Issued-at time.
    pub iat: i64,
}

impl Claims {
    /// Creates claims for `subject` valid for the given duration from now.
    #[must_use]
    pub fn new(subject: impl Into<String>, valid_for: Duration) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            sub: subject.into(),
            exp: now + valid_for.whole_seconds(),
            iat: now,
        }
    }

    /// Whether the expiration time has already passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.exp < OffsetDateTime::now_utc().unix_timestamp()
    }
}

//! Errors surfaced by the upstream client.

/// Errors that can occur while talking to the upstream API.
///
/// Both variants carry the identifier or name whose fetch failed, so the
/// caller can say which resource broke a fan-out of many.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The remote call did not return success (transport failure or
    /// non-2xx status).
    #[error("Upstream unavailable for {resource}: {detail}")]
    Unavailable {
        /// The identifier or name being fetched.
        resource: String,
        /// The underlying failure.
        detail: String,
    },

    /// The remote returned a body that does not decode into the expected
    /// payload shape.
    #[error("Malformed upstream payload for {resource}: {detail}")]
    Malformed {
        /// The identifier or name being fetched.
        resource: String,
        /// What failed to decode.
        detail: String,
    },
}

impl UpstreamError {
    /// Creates a new `Unavailable` error.
    #[must_use]
    pub fn unavailable(resource: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Unavailable {
            resource: resource.into(),
            detail: detail.into(),
        }
    }

    /// Creates a new `Malformed` error.
    #[must_use]
    pub fn malformed(resource: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Malformed {
            resource: resource.into(),
            detail: detail.into(),
        }
    }

    /// Returns true if this is an `Unavailable` error.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

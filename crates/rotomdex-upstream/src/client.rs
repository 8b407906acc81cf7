//! The read-only upstream API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::UpstreamError;
use crate::types::{NamedResource, PokemonDetail, PokemonSpecies, SpeciesPage};

/// Configuration for the upstream client, passed in at construction.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API.
    pub base_url: Url,

    /// HTTP request timeout (default: 30 seconds).
    pub request_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://pokeapi.co/api/v2").expect("default base URL is valid"),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl UpstreamConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// The upstream read surface: one page of species names plus per-key
/// detail and species payloads.
///
/// Stateless per call; no retry. Failures carry the offending key so a
/// caller fanning out over many names can report which one broke.
#[async_trait]
pub trait PokeApi: Send + Sync {
    /// Fetches one page of up to `limit` species references, in upstream
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Unavailable` on transport failure or a
    /// non-success status, `UpstreamError::Malformed` on an undecodable
    /// body.
    async fn list_species(&self, limit: u32) -> Result<Vec<NamedResource>, UpstreamError>;

    /// Fetches the detail payload for a name or numeric id.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`PokeApi::list_species`].
    async fn fetch_pokemon(&self, key: &str) -> Result<PokemonDetail, UpstreamError>;

    /// Fetches the species payload for a name or numeric id.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`PokeApi::list_species`].
    async fn fetch_species(&self, key: &str) -> Result<PokemonSpecies, UpstreamError>;
}

/// reqwest-backed implementation of [`PokeApi`].
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Creates a new client with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should not happen in
    /// practice).
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a new client with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(UpstreamConfig::default())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        resource: &str,
    ) -> Result<T, UpstreamError> {
        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(resource, error = %e, "upstream request failed");
                UpstreamError::unavailable(resource, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::unavailable(
                resource,
                format!("upstream returned status {}", status.as_u16()),
            ));
        }

        response.json().await.map_err(|e| {
            tracing::warn!(resource, error = %e, "upstream payload failed to decode");
            UpstreamError::malformed(resource, e.to_string())
        })
    }
}

#[async_trait]
impl PokeApi for PokeApiClient {
    async fn list_species(&self, limit: u32) -> Result<Vec<NamedResource>, UpstreamError> {
        let url = format!("{}/pokemon?limit={limit}", self.base_url);
        let page: SpeciesPage = self.get_json(url, "species list").await?;
        Ok(page.results)
    }

    async fn fetch_pokemon(&self, key: &str) -> Result<PokemonDetail, UpstreamError> {
        let url = format!("{}/pokemon/{key}", self.base_url);
        self.get_json(url, key).await
    }

    async fn fetch_species(&self, key: &str) -> Result<PokemonSpecies, UpstreamError> {
        let url = format!("{}/pokemon-species/{key}", self.base_url);
        self.get_json(url, key).await
    }
}

//! PokeAPI pokemon client
//!
//! Fetches individual catalog entries by name, with responses memoized in
//! the shared cache.

use reqwest::Client;
use thiserror::Error;

use super::{fetch_bytes, Pokemon};
use crate::cache::ResponseCache;

/// Base URL for pokemon lookups by name
const POKEMON_URL: &str = "https://pokeapi.co/api/v2/pokemon/";

/// Errors that can occur when fetching a catalog entry
#[derive(Debug, Error)]
pub enum PokemonError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for the pokemon endpoint of the catalog
#[derive(Debug, Clone)]
pub struct PokemonClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Shared response cache, keyed by full request URL
    cache: ResponseCache,
    /// Base URL for lookups (overridable for tests)
    base_url: String,
}

impl PokemonClient {
    /// Creates a new PokemonClient backed by the given cache.
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url: POKEMON_URL.to_string(),
        }
    }

    /// Creates a new PokemonClient with a custom base URL (for testing)
    #[allow(dead_code)]
    pub fn with_base_url(cache: ResponseCache, base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url: base_url.into(),
        }
    }

    /// Fetches the catalog entry for `name`.
    ///
    /// The name is lowercased before the lookup, so `Pidgey` and `pidgey`
    /// resolve to the same entry and the same cache key.
    pub async fn fetch(&self, name: &str) -> Result<Pokemon, PokemonError> {
        let url = format!("{}{}", self.base_url, name.to_lowercase());
        let body = fetch_bytes(&self.http_client, &self.cache, &url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

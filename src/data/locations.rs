//! PokeAPI location listing and area exploration client
//!
//! Pages the location listing and fetches encounter data for individual
//! location areas, with responses memoized in the shared cache.

use reqwest::Client;
use thiserror::Error;

use super::{fetch_bytes, LocationArea, LocationPage};
use crate::cache::ResponseCache;

/// First page of the location listing
pub const LOCATIONS_URL: &str = "https://pokeapi.co/api/v2/location/";

/// Base URL for location-area lookups by name
const LOCATION_AREA_URL: &str = "https://pokeapi.co/api/v2/location-area/";

/// Errors that can occur when fetching location data
#[derive(Debug, Error)]
pub enum LocationError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for the location endpoints of the catalog
#[derive(Debug, Clone)]
pub struct LocationClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Shared response cache, keyed by full request URL
    cache: ResponseCache,
    /// Base URL for area lookups (overridable for tests)
    area_base_url: String,
}

impl LocationClient {
    /// Creates a new LocationClient backed by the given cache.
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            area_base_url: LOCATION_AREA_URL.to_string(),
        }
    }

    /// Creates a new LocationClient with a custom area base URL (for testing)
    #[allow(dead_code)]
    pub fn with_area_base_url(cache: ResponseCache, area_base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            area_base_url: area_base_url.into(),
        }
    }

    /// Fetches one page of the location listing.
    ///
    /// # Arguments
    /// * `url` - Absolute page URL; either [`LOCATIONS_URL`] or a
    ///   `next`/`previous` URL taken from a previously fetched page
    pub async fn fetch_page(&self, url: &str) -> Result<LocationPage, LocationError> {
        let body = fetch_bytes(&self.http_client, &self.cache, url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches encounter data for the named location area.
    pub async fn fetch_area(&self, area: &str) -> Result<LocationArea, LocationError> {
        let url = format!("{}{}", self.area_base_url, area);
        let body = fetch_bytes(&self.http_client, &self.cache, &url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Seeding the cache under the exact request URL must satisfy a fetch
    /// without any network traffic.
    #[tokio::test]
    async fn test_fetch_page_is_served_from_cache() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let body = br#"{"count": 1, "next": null, "previous": null, "results": [{"name": "canalave-city", "url": "https://pokeapi.co/api/v2/location/1/"}]}"#;
        cache.put(LOCATIONS_URL, body.to_vec()).await;

        let client = LocationClient::new(cache);
        let page = client
            .fetch_page(LOCATIONS_URL)
            .await
            .expect("cached page should decode");

        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].name, "canalave-city");
    }

    #[tokio::test]
    async fn test_fetch_area_is_served_from_cache() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let url = format!("{}great-marsh-area-1", LOCATION_AREA_URL);
        let body = br#"{"name": "great-marsh-area-1", "pokemon_encounters": [{"pokemon": {"name": "bidoof", "url": "https://pokeapi.co/api/v2/pokemon/399/"}}]}"#;
        cache.put(url, body.to_vec()).await;

        let client = LocationClient::new(cache);
        let area = client
            .fetch_area("great-marsh-area-1")
            .await
            .expect("cached area should decode");

        assert_eq!(area.pokemon_encounters.len(), 1);
        assert_eq!(area.pokemon_encounters[0].pokemon.name, "bidoof");
    }

    #[tokio::test]
    async fn test_fetch_page_with_undecodable_body_is_a_parse_error() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put(LOCATIONS_URL, b"not json at all".to_vec()).await;

        let client = LocationClient::new(cache);
        let result = client.fetch_page(LOCATIONS_URL).await;

        assert!(matches!(result, Err(LocationError::ParseError(_))));
    }
}

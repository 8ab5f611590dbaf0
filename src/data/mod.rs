//! Core data models for the PokeAPI catalog
//!
//! This module contains the types decoded from PokeAPI responses and the
//! clients that fetch them. Every fetch goes through the response cache
//! first: on a miss the raw body is fetched, stored under the full request
//! URL, and only then decoded.

pub mod locations;
pub mod pokemon;

pub use locations::{LocationClient, LocationError, LOCATIONS_URL};
pub use pokemon::{PokemonClient, PokemonError};

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::cache::ResponseCache;

/// A `{name, url}` reference, the shape PokeAPI uses for every resource link
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[allow(dead_code)]
    pub url: String,
}

/// One page of the location listing
#[derive(Debug, Clone, Deserialize)]
pub struct LocationPage {
    /// Total number of locations in the catalog
    #[allow(dead_code)]
    pub count: u32,
    /// Absolute URL of the next page, absent on the last page
    pub next: Option<String>,
    /// Absolute URL of the previous page, absent on the first page
    pub previous: Option<String>,
    /// Locations on this page
    pub results: Vec<NamedResource>,
}

/// Encounter data for a single location area
#[derive(Debug, Clone, Deserialize)]
pub struct LocationArea {
    /// Name of the area
    #[allow(dead_code)]
    pub name: String,
    /// Entries that can be encountered in this area
    pub pokemon_encounters: Vec<Encounter>,
}

/// A single encounter slot within a location area
#[derive(Debug, Clone, Deserialize)]
pub struct Encounter {
    pub pokemon: NamedResource,
}

/// A catalog entry, decoded with just the fields the explorer uses
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub name: String,
    /// Drives the capture roll; absent for some catalog entries
    #[serde(default)]
    pub base_experience: Option<i64>,
    pub height: i64,
    pub weight: i64,
    pub stats: Vec<PokemonStat>,
    pub types: Vec<PokemonType>,
}

/// One base stat of a catalog entry
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: i64,
    pub stat: NamedResource,
}

/// One type of a catalog entry
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

/// Returns the raw response body for `url`, consulting `cache` first.
///
/// On a miss the body is fetched over HTTP, stored in the cache under the
/// full URL, then returned. Non-2xx responses are errors.
pub(crate) async fn fetch_bytes(
    http_client: &Client,
    cache: &ResponseCache,
    url: &str,
) -> Result<Vec<u8>, reqwest::Error> {
    if let Some(body) = cache.get(url).await {
        debug!(url, "cache hit");
        return Ok(body);
    }

    debug!(url, "cache miss, fetching");
    let response = http_client.get(url).send().await?.error_for_status()?;
    let body = response.bytes().await?.to_vec();
    cache.put(url, body.clone()).await;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trimmed-down PokeAPI location listing page
    const PAGE_JSON: &str = r#"{
        "count": 1054,
        "next": "https://pokeapi.co/api/v2/location/?offset=20&limit=20",
        "previous": null,
        "results": [
            {"name": "canalave-city", "url": "https://pokeapi.co/api/v2/location/1/"},
            {"name": "eterna-city", "url": "https://pokeapi.co/api/v2/location/2/"}
        ]
    }"#;

    /// Trimmed-down location-area response
    const AREA_JSON: &str = r#"{
        "name": "pastoria-city-area",
        "pokemon_encounters": [
            {"pokemon": {"name": "tentacool", "url": "https://pokeapi.co/api/v2/pokemon/72/"}},
            {"pokemon": {"name": "magikarp", "url": "https://pokeapi.co/api/v2/pokemon/129/"}}
        ]
    }"#;

    /// Trimmed-down pokemon response
    const POKEMON_JSON: &str = r#"{
        "name": "pidgey",
        "base_experience": 50,
        "height": 3,
        "weight": 18,
        "stats": [
            {"base_stat": 40, "stat": {"name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/"}},
            {"base_stat": 45, "stat": {"name": "attack", "url": "https://pokeapi.co/api/v2/stat/2/"}}
        ],
        "types": [
            {"type": {"name": "normal", "url": "https://pokeapi.co/api/v2/type/1/"}},
            {"type": {"name": "flying", "url": "https://pokeapi.co/api/v2/type/3/"}}
        ]
    }"#;

    #[test]
    fn test_decode_location_page() {
        let page: LocationPage = serde_json::from_str(PAGE_JSON).expect("Failed to decode page");

        assert_eq!(page.count, 1054);
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].name, "canalave-city");
    }

    #[test]
    fn test_decode_last_page_has_no_next() {
        let json = r#"{"count": 2, "next": null, "previous": "https://pokeapi.co/api/v2/location/?offset=0&limit=20", "results": []}"#;
        let page: LocationPage = serde_json::from_str(json).expect("Failed to decode page");

        assert!(page.next.is_none());
        assert!(page.previous.is_some());
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_decode_location_area() {
        let area: LocationArea = serde_json::from_str(AREA_JSON).expect("Failed to decode area");

        assert_eq!(area.name, "pastoria-city-area");
        assert_eq!(area.pokemon_encounters.len(), 2);
        assert_eq!(area.pokemon_encounters[0].pokemon.name, "tentacool");
        assert_eq!(area.pokemon_encounters[1].pokemon.name, "magikarp");
    }

    #[test]
    fn test_decode_pokemon() {
        let pokemon: Pokemon = serde_json::from_str(POKEMON_JSON).expect("Failed to decode pokemon");

        assert_eq!(pokemon.name, "pidgey");
        assert_eq!(pokemon.base_experience, Some(50));
        assert_eq!(pokemon.height, 3);
        assert_eq!(pokemon.weight, 18);
        assert_eq!(pokemon.stats[0].stat.name, "hp");
        assert_eq!(pokemon.stats[0].base_stat, 40);
        assert_eq!(pokemon.types[1].type_.name, "flying");
    }

    #[test]
    fn test_decode_pokemon_without_base_experience() {
        let json = r#"{
            "name": "eternatus-eternamax",
            "base_experience": null,
            "height": 1000,
            "weight": 9500,
            "stats": [],
            "types": []
        }"#;
        let pokemon: Pokemon = serde_json::from_str(json).expect("Failed to decode pokemon");

        assert_eq!(pokemon.base_experience, None);
    }

    #[test]
    fn test_decode_malformed_json_fails() {
        let result: Result<LocationPage, _> = serde_json::from_str("{ not json }");
        assert!(result.is_err());
    }
}

//! Registry of captured catalog entries
//!
//! Holds every entry the user has successfully captured this session, plus
//! the capture-roll simulation itself. The registry is plain in-process
//! state owned by the REPL; nothing here touches the network or the cache.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::data::Pokemon;

/// Width of the winning band at the top of the capture roll range
const CATCH_MARGIN: i64 = 30;

/// A captured entry and when it was captured
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    /// The full catalog entry as fetched at capture time
    pub pokemon: Pokemon,
    /// When the capture succeeded
    pub caught_at: DateTime<Utc>,
}

/// In-memory registry of captured entries, keyed by name
#[derive(Debug, Default)]
pub struct Pokedex {
    entries: HashMap<String, CaughtPokemon>,
}

impl Pokedex {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a capture, replacing any earlier capture of the same name.
    pub fn record(&mut self, pokemon: Pokemon) {
        let caught = CaughtPokemon {
            caught_at: Utc::now(),
            pokemon,
        };
        self.entries.insert(caught.pokemon.name.clone(), caught);
    }

    /// Returns the captured entry for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.entries.get(name)
    }

    /// Returns all captured names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of captured entries.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rolls whether a capture attempt on `pokemon` succeeds.
///
/// A uniform roll in `0..base_experience` must exceed
/// `base_experience - 30`, so stronger entries leave a proportionally
/// smaller winning band. Entries with no base experience in the catalog
/// are always caught.
pub fn capture_roll(pokemon: &Pokemon) -> bool {
    capture_roll_with(&mut rand::thread_rng(), pokemon)
}

fn capture_roll_with<R: Rng>(rng: &mut R, pokemon: &Pokemon) -> bool {
    let base = pokemon.base_experience.unwrap_or(0);
    if base <= 0 {
        return true;
    }
    rng.gen_range(0..base) > base - CATCH_MARGIN
}

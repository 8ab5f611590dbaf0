//! REPL state and command dispatch
//!
//! This module owns the interactive session: the pagination cursor over the
//! location listing, the registry of captured entries, and the API clients.
//! Input lines are parsed into [`Command`] values and dispatched against
//! the [`App`] state.

use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::cache::ResponseCache;
use crate::data::{LocationClient, LocationPage, PokemonClient, LOCATIONS_URL};
use crate::pokedex::{capture_roll, Pokedex};

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    /// Show the next page of the location listing
    Map,
    /// Show the previous page of the location listing
    MapBack,
    /// List the entries encountered in a location area
    Explore { area: String },
    /// Attempt to capture the named entry
    Catch { name: String },
    /// Show details of a captured entry
    Inspect { name: String },
    /// List every captured entry
    Pokedex,
}

/// Errors produced when an input line cannot be parsed into a command
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The line contained no command word
    #[error("empty input")]
    Empty,

    /// The command word is not recognized
    #[error("unknown command '{0}', call help for more info")]
    Unknown(String),

    /// The command takes exactly one argument
    #[error("{command} takes exactly one argument ({argument})")]
    WrongArgCount {
        command: &'static str,
        argument: &'static str,
    },
}

impl Command {
    /// Parses an input line into a command.
    ///
    /// The command word is case insensitive; arguments are passed through
    /// as typed. Commands that take no arguments ignore any extras.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut parts = line.split_whitespace();
        let word = parts.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = parts.collect();

        match word.to_lowercase().as_str() {
            "help" => Ok(Command::Help),
            "exit" => Ok(Command::Exit),
            "map" => Ok(Command::Map),
            "mapb" => Ok(Command::MapBack),
            "explore" => match args.as_slice() {
                [area] => Ok(Command::Explore {
                    area: area.to_string(),
                }),
                _ => Err(CommandError::WrongArgCount {
                    command: "explore",
                    argument: "a location area",
                }),
            },
            "catch" => match args.as_slice() {
                [name] => Ok(Command::Catch {
                    name: name.to_string(),
                }),
                _ => Err(CommandError::WrongArgCount {
                    command: "catch",
                    argument: "a pokemon name",
                }),
            },
            "inspect" => match args.as_slice() {
                [name] => Ok(Command::Inspect {
                    name: name.to_string(),
                }),
                _ => Err(CommandError::WrongArgCount {
                    command: "inspect",
                    argument: "a pokemon name",
                }),
            },
            "pokedex" => Ok(Command::Pokedex),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Interactive session state
pub struct App {
    /// URL of the next listing page, if any
    next_page: Option<String>,
    /// URL of the previous listing page, if any
    previous_page: Option<String>,
    /// Registry of captured entries
    pokedex: Pokedex,
    /// Client for location listing and exploration
    location_client: LocationClient,
    /// Client for catalog entry lookups
    pokemon_client: PokemonClient,
    /// Set by the `exit` command
    pub should_quit: bool,
}

impl App {
    /// Creates the session state with the cursor seeded at the first
    /// listing page. Both clients share the given cache.
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            next_page: Some(LOCATIONS_URL.to_string()),
            previous_page: None,
            pokedex: Pokedex::new(),
            location_client: LocationClient::new(cache.clone()),
            pokemon_client: PokemonClient::new(cache),
            should_quit: false,
        }
    }

    /// Executes one parsed command against the current state.
    pub async fn dispatch(&mut self, command: Command) {
        match command {
            Command::Help => self.show_help(),
            Command::Exit => self.should_quit = true,
            Command::Map => self.page_forward().await,
            Command::MapBack => self.page_back().await,
            Command::Explore { area } => self.explore(&area).await,
            Command::Catch { name } => self.catch(&name).await,
            Command::Inspect { name } => self.inspect(&name),
            Command::Pokedex => self.list_caught(),
        }
    }

    fn show_help(&self) {
        println!(
            "Welcome to the Rustdex!
Usage:

help: Displays a help message
exit: Exit the Rustdex
map: Display the next 20 locations
mapb: Display the previous 20 locations
explore <area>: List the pokemon found in a location area
catch <pokemon>: Throw a ball at the named pokemon
inspect <pokemon>: Show details of a caught pokemon
pokedex: List every pokemon you have caught"
        );
    }

    async fn page_forward(&mut self) {
        match self.next_page.clone() {
            Some(url) => self.show_page(&url).await,
            None => println!("No more locations"),
        }
    }

    async fn page_back(&mut self) {
        match self.previous_page.clone() {
            Some(url) => self.show_page(&url).await,
            None => println!("No previous locations"),
        }
    }

    /// Fetches one listing page, prints its locations, and moves the
    /// pagination cursor to the page's own next/previous URLs.
    async fn show_page(&mut self, url: &str) {
        let started = Instant::now();
        match self.location_client.fetch_page(url).await {
            Ok(page) => {
                self.apply_page(&page);
                for location in &page.results {
                    println!("{}", location.name);
                }
                debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "listing page rendered"
                );
            }
            Err(err) => println!("failed to get locations: {err}"),
        }
    }

    fn apply_page(&mut self, page: &LocationPage) {
        self.next_page = page.next.clone();
        self.previous_page = page.previous.clone();
    }

    async fn explore(&mut self, area: &str) {
        println!("Exploring {area}...");
        match self.location_client.fetch_area(area).await {
            Ok(area_data) => {
                println!("Found Pokemon:");
                for encounter in &area_data.pokemon_encounters {
                    println!(" - {}", encounter.pokemon.name);
                }
            }
            Err(err) => println!("failed to explore {area}: {err}"),
        }
    }

    async fn catch(&mut self, name: &str) {
        let name = name.to_lowercase();
        let pokemon = match self.pokemon_client.fetch(&name).await {
            Ok(pokemon) => pokemon,
            Err(err) => {
                println!("failed to get pokemon {name}: {err}");
                return;
            }
        };

        println!("Throwing a Pokeball at {name}...");
        if capture_roll(&pokemon) {
            println!("{name} was caught!");
            self.pokedex.record(pokemon);
        } else {
            println!("{name} escaped!");
        }
    }

    fn inspect(&self, name: &str) {
        match self.pokedex.get(&name.to_lowercase()) {
            Some(caught) => {
                let pokemon = &caught.pokemon;
                println!("Name: {}", pokemon.name);
                println!("Caught at: {}", caught.caught_at.format("%Y-%m-%d %H:%M UTC"));
                println!("Height: {}", pokemon.height);
                println!("Weight: {}", pokemon.weight);
                println!("Stats:");
                for stat in &pokemon.stats {
                    println!("  -{}: {}", stat.stat.name, stat.base_stat);
                }
                println!("Types:");
                for kind in &pokemon.types {
                    println!("  - {}", kind.type_.name);
                }
            }
            None => println!("you have not caught that pokemon"),
        }
    }

    fn list_caught(&self) {
        if self.pokedex.is_empty() {
            println!("Your Pokedex is empty");
            return;
        }
        println!("Your Pokedex:");
        for name in self.pokedex.names() {
            println!(" - {name}");
        }
    }
}

//! Rustdex - interactive explorer for the PokeAPI catalog
//!
//! A read-eval loop that pages through location listings, explores the
//! encounter data of named areas, and simulates capturing entries. HTTP
//! responses are memoized in an in-memory TTL cache so repeated navigation
//! skips the network.

mod app;
mod cache;
mod cli;
mod data;
mod pokedex;

use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Command, CommandError};
use cache::ResponseCache;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs stay out of the prompt by default; RUST_LOG=rustdex=debug shows
    // cache hits, sweeps, and command timings.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rustdex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let ttl = cli.ttl()?;

    // One cache for the whole session, injected into both API clients.
    let cache = ResponseCache::new(ttl);
    let mut app = App::new(cache.clone());
    info!(ttl_secs = ttl.as_secs(), "session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("rustdex > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // stdin closed
        };
        match Command::parse(&line) {
            Ok(command) => app.dispatch(command).await,
            Err(CommandError::Empty) => {}
            Err(err) => println!("{err}"),
        }
        if app.should_quit {
            break;
        }
    }

    cache.shutdown().await;
    info!("session ended");
    Ok(())
}

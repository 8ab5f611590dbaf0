//! Command-line interface parsing for Rustdex
//!
//! This module handles parsing of CLI arguments using clap. The only knob
//! is the response-cache TTL; everything else happens inside the REPL.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

/// Default time-to-live for cached API responses, in seconds
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// A zero TTL would make every cached response immediately removable
    #[error("--cache-ttl must be at least one second")]
    ZeroCacheTtl,
}

/// Rustdex - explore the PokeAPI catalog from your terminal
#[derive(Parser, Debug)]
#[command(name = "rustdex")]
#[command(about = "Interactive PokeAPI catalog explorer")]
#[command(version)]
pub struct Cli {
    /// How long fetched API responses stay cached, in seconds
    ///
    /// Paging back and forth through listings within this window is served
    /// from memory instead of the network.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl: u64,
}

impl Cli {
    /// Returns the validated cache TTL as a duration.
    ///
    /// # Returns
    /// * `Ok(Duration)` for a positive TTL
    /// * `Err(CliError::ZeroCacheTtl)` when `--cache-ttl 0` was given
    pub fn ttl(&self) -> Result<Duration, CliError> {
        if self.cache_ttl == 0 {
            return Err(CliError::ZeroCacheTtl);
        }
        Ok(Duration::from_secs(self.cache_ttl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args_uses_the_default_ttl() {
        let cli = Cli::parse_from(["rustdex"]);
        assert_eq!(cli.cache_ttl, DEFAULT_CACHE_TTL_SECS);
        assert_eq!(cli.ttl().unwrap(), Duration::from_secs(300));
    }

    #[test]
    fn test_cli_parse_custom_ttl() {
        let cli = Cli::parse_from(["rustdex", "--cache-ttl", "60"]);
        assert_eq!(cli.ttl().unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn test_cli_rejects_zero_ttl() {
        let cli = Cli::parse_from(["rustdex", "--cache-ttl", "0"]);
        assert_eq!(cli.ttl().unwrap_err(), CliError::ZeroCacheTtl);
    }

    #[test]
    fn test_cli_rejects_non_numeric_ttl() {
        let result = Cli::try_parse_from(["rustdex", "--cache-ttl", "forever"]);
        assert!(result.is_err());
    }
}

//! Error types for the Pokedex shell
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while constructing a cache.
///
/// Reads and writes never fail; a miss is reported as `None`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The reap interval must be strictly positive
    #[error("Invalid cache interval: {0:?} (must be greater than zero and within timer range)")]
    InvalidInterval(Duration),

    /// The reaper needs a Tokio runtime to run on
    #[error("No async runtime available to host the cache reaper")]
    NoRuntime,
}

// == Command Error Enum ==
/// Errors surfaced by shell commands and printed back to the user.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A required argument was not supplied
    #[error("{0}")]
    MissingArgument(&'static str),

    /// The HTTP request could not be completed
    #[error("Request to PokeAPI failed: {0}")]
    Http(#[from] reqwest::Error),

    /// PokeAPI answered with a non-success status
    #[error("PokeAPI returned error code: {0}")]
    Status(u16),

    /// The response body was not the JSON we expected
    #[error("Failed to decode PokeAPI response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The location area has no encounters
    #[error("no pokemon found in location area {0}")]
    NoPokemon(String),

    /// Writing to the shell output failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for shell commands.
pub type Result<T> = std::result::Result<T, CommandError>;

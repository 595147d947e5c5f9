//! Pokedex - An interactive shell for exploring PokeAPI
//!
//! Responses are kept in a time-bounded cache that reaps stale entries in the
//! background.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::Cache;
pub use config::Config;
pub use repl::Session;

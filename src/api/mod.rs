//! API Module
//!
//! Cache-aware client for the PokeAPI REST service.
//!
//! # Endpoints
//! - `GET /location-area` - Paginated list of location areas
//! - `GET /location-area/{name}` - Pokemon encounters in an area
//! - `GET /pokemon/{name}` - Pokemon details

pub mod client;

pub use client::{Fetched, PokeApiClient};

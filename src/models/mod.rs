//! Data Models Module
//!
//! PokeAPI response payloads decoded with serde.

mod location;
mod pokemon;

pub use location::{Encounter, LocationAreaDetail, LocationAreaPage, NamedResource};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};

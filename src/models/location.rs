//! Location area payloads
//!
//! Shapes of the `/location-area` list and detail endpoints.

use serde::Deserialize;

/// A `{ name, url }` pair as PokeAPI uses for references.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of the paginated location area listing.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas
    pub count: u32,
    /// URL of the following page, absent on the last page
    pub next: Option<String>,
    /// URL of the preceding page, absent on the first page
    pub previous: Option<String>,
    /// Location areas on this page
    pub results: Vec<NamedResource>,
}

/// A single Pokemon encounter in a location area.
#[derive(Debug, Clone, Deserialize)]
pub struct Encounter {
    pub pokemon: NamedResource,
}

/// Detail view of one location area.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreaDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<Encounter>,
}

impl LocationAreaDetail {
    /// Names of the Pokemon that can be encountered here, in API order.
    pub fn pokemon_names(&self) -> Vec<&str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
            .collect()
    }
}

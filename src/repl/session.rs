//! Session State
//!
//! Everything a shell command may read or change, passed explicitly to each
//! command.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::api::PokeApiClient;
use crate::cache::Cache;
use crate::models::Pokemon;

// == Pokedex ==
/// Pokemon caught during this session, keyed by the name they were caught as.
#[derive(Debug, Default, Clone)]
pub struct Pokedex {
    caught: BTreeMap<String, Pokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch, replacing an earlier catch of the same name.
    pub fn insert(&mut self, name: impl Into<String>, pokemon: Pokemon) {
        self.caught.insert(name.into(), pokemon);
    }

    pub fn get(&self, name: &str) -> Option<&Pokemon> {
        self.caught.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.caught.contains_key(name)
    }

    /// Caught Pokemon in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Pokemon> {
        self.caught.values()
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}

// == Session ==
/// Shell state: pagination cursor, response cache, API client, caught
/// Pokemon and the RNG used for catch rolls.
#[derive(Debug)]
pub struct Session {
    /// URL of the next location area page, if one is known
    pub next: Option<String>,
    /// URL of the previous location area page, if one is known
    pub previous: Option<String>,
    pub cache: Cache,
    pub client: PokeApiClient,
    pub pokedex: Pokedex,
    pub(crate) rng: StdRng,
}

impl Session {
    /// Creates a fresh session with an entropy-seeded RNG.
    pub fn new(cache: Cache, client: PokeApiClient) -> Self {
        Self {
            next: None,
            previous: None,
            cache,
            client,
            pokedex: Pokedex::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Replaces the RNG with one seeded from `seed`, for reproducible catches.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

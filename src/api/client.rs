//! PokeAPI Client
//!
//! HTTP client that serves responses from the shared cache when it can and
//! falls through to the network otherwise.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CommandError, Result};
use crate::models::{LocationAreaDetail, LocationAreaPage, Pokemon};

/// Client for the PokeAPI REST endpoints.
///
/// Raw response bodies are cached under their request URL, so the cache
/// never needs to understand what it stores.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client for `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.http_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the first page of location areas.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    // == Fetch ==
    /// Returns the body for `url`, from `cache` if present, otherwise from
    /// the network.
    pub async fn fetch_bytes(&self, cache: &Cache, url: &str) -> Result<Fetched<Vec<u8>>> {
        if let Some(body) = cache.get(url).await {
            debug!("Cache hit for {}", url);
            return Ok(Fetched::cached(body));
        }

        let body = self.download_bytes(cache, url).await?;
        Ok(Fetched::downloaded(body))
    }

    /// Requests `url` from the network and caches the body.
    ///
    /// Only successful responses are cached.
    pub async fn download_bytes(&self, cache: &Cache, url: &str) -> Result<Vec<u8>> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommandError::Status(status.as_u16()));
        }

        let body = response.bytes().await?.to_vec();
        cache.add(url, body.clone()).await;
        Ok(body)
    }

    /// Decodes the cached body for `url`, if there is one. Never touches the
    /// network.
    pub async fn cached<T: DeserializeOwned>(&self, cache: &Cache, url: &str) -> Result<Option<T>> {
        match cache.get(url).await {
            Some(body) => Ok(Some(serde_json::from_slice(&body)?)),
            None => Ok(None),
        }
    }

    /// Requests `url` from the network, caches it and decodes it.
    pub async fn download<T: DeserializeOwned>(&self, cache: &Cache, url: &str) -> Result<T> {
        let body = self.download_bytes(cache, url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, cache: &Cache, url: &str) -> Result<Fetched<T>> {
        let fetched = self.fetch_bytes(cache, url).await?;
        Ok(Fetched {
            value: serde_json::from_slice(&fetched.value)?,
            from_cache: fetched.from_cache,
        })
    }

    /// Fetches one page of the location area listing.
    pub async fn location_area_page(
        &self,
        cache: &Cache,
        url: &str,
    ) -> Result<Fetched<LocationAreaPage>> {
        self.fetch_json(cache, url).await
    }

    /// Fetches the detail view of a location area by name.
    pub async fn location_area(
        &self,
        cache: &Cache,
        name: &str,
    ) -> Result<Fetched<LocationAreaDetail>> {
        self.fetch_json(cache, &self.location_area_url(name)).await
    }

    /// Fetches a Pokemon by name.
    pub async fn pokemon(&self, cache: &Cache, name: &str) -> Result<Fetched<Pokemon>> {
        self.fetch_json(cache, &self.pokemon_url(name)).await
    }
}

// == Fetched ==
/// A response value and whether it was served from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub from_cache: bool,
}

impl<T> Fetched<T> {
    fn cached(value: T) -> Self {
        Self {
            value,
            from_cache: true,
        }
    }

    fn downloaded(value: T) -> Self {
        Self {
            value,
            from_cache: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port, so any network call fails fast
    const OFFLINE_BASE: &str = "http://127.0.0.1:9/api/v2";

    fn offline_client() -> PokeApiClient {
        PokeApiClient::new(OFFLINE_BASE, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_urls() {
        let client = PokeApiClient::with_client(Client::new(), "https://pokeapi.co/api/v2/");

        assert_eq!(client.base_url(), "https://pokeapi.co/api/v2");
        assert_eq!(
            client.location_areas_url(),
            "https://pokeapi.co/api/v2/location-area"
        );
        assert_eq!(
            client.location_area_url("canalave-city-area"),
            "https://pokeapi.co/api/v2/location-area/canalave-city-area"
        );
        assert_eq!(
            client.pokemon_url("pikachu"),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
    }

    #[tokio::test]
    async fn test_fetch_served_from_cache() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let client = offline_client();
        let url = client.pokemon_url("pidgey");
        cache
            .add(
                url.as_str(),
                br#"{"name":"pidgey","base_experience":50,"height":3,"weight":18}"#.to_vec(),
            )
            .await;

        let fetched = client.pokemon(&cache, "pidgey").await.unwrap();

        assert!(fetched.from_cache);
        assert_eq!(fetched.value.name, "pidgey");
        assert_eq!(cache.stats().await.hits, 1);
        cache.close().await;
    }

    #[tokio::test]
    async fn test_fetch_miss_goes_to_network() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let client = offline_client();

        let result = client.fetch_bytes(&cache, &client.location_areas_url()).await;

        assert!(matches!(result, Err(CommandError::Http(_))));
        assert!(cache.is_empty().await, "Failed requests must not be cached");
        cache.close().await;
    }

    #[tokio::test]
    async fn test_cached_garbage_is_decode_error() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let client = offline_client();
        cache
            .add(client.location_area_url("nowhere"), b"not json".to_vec())
            .await;

        let result = client.location_area(&cache, "nowhere").await;

        assert!(matches!(result, Err(CommandError::Decode(_))));
        cache.close().await;
    }

    #[tokio::test]
    async fn test_cached_lookup_stays_offline() {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        let client = offline_client();
        let url = client.location_area_url("eterna-city-area");

        let missing: Option<LocationAreaDetail> = client.cached(&cache, &url).await.unwrap();
        assert!(missing.is_none());

        cache
            .add(url.as_str(), br#"{"name":"eterna-city-area"}"#.to_vec())
            .await;
        let found: Option<LocationAreaDetail> = client.cached(&cache, &url).await.unwrap();
        assert_eq!(found.map(|detail| detail.name), Some("eterna-city-area".to_string()));
        cache.close().await;
    }
}

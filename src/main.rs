//! Pokedex - An interactive shell for exploring PokeAPI
//!
//! Reads commands from stdin and prints results to stdout. Logs go to stderr
//! and are controlled with `RUST_LOG`.

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, Cache, Config, PokeApiClient, Session};

/// Main entry point for the Pokedex shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Run the shell until `exit` or end of input
/// 5. Stop the reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Quiet by default so log lines don't interleave with the prompt
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}s, api_base_url={}, http_timeout={}s",
        config.cache_interval, config.api_base_url, config.http_timeout
    );

    let cache = Cache::new(config.cache_interval()).context("failed to create response cache")?;
    let client = PokeApiClient::from_config(&config).context("failed to build HTTP client")?;
    let mut session = Session::new(cache, client);

    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let result = repl::run(&mut session, input, &mut stdout).await;

    session.cache.close().await;
    let stats = session.cache.stats().await;
    info!(
        "Shutdown complete: hits={}, misses={}, reaped={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.reaped,
        stats.hit_rate()
    );

    result.context("failed to read input")
}

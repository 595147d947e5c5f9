//! Cache Module
//!
//! Provides a time-bounded in-memory cache that cleans itself up in the
//! background.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;

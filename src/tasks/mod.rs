//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the shell is alive.
//!
//! # Tasks
//! - Cache reaper: removes entries older than the cache interval

mod reaper;

pub use reaper::spawn_reaper;

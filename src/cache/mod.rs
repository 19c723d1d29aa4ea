//! File content caching.
//!
//! This module keeps file contents in memory and decides, per request, whether
//! storage has to be consulted again.
//!
//! # Architecture
//!
//! * [`file_cache`]: the [`FileCache`] policy itself.
//! * [`entry`]: the per-path record and its staleness-window check.
//! * [`stats`]: counters describing how requests were served.
//!
//! # Cache Invalidation
//!
//! Each entry remembers when its fingerprint was last verified:
//! * Within the recheck delay, content is returned with no I/O at all.
//! * After it, the fingerprint is recomputed. A match only refreshes the
//!   check time; a mismatch re-reads the file and replaces the entry.
//!
//! Entries are never evicted, and a failed request never modifies one.

pub mod entry;
pub mod file_cache;
pub mod stats;

pub use entry::CacheEntry;
pub use file_cache::{ConfiguredFileCache, FileCache};
pub use stats::CacheStats;

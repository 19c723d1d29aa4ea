//! FileCache - polling file content cache
//!
//! Keeps file contents in memory and re-validates them lazily: a file is
//! fingerprinted at most once per recheck delay and re-read only when its
//! fingerprint changes.
//!
//! ```no_run
//! use filecache::cache::FileCache;
//! use filecache::clock::SystemClock;
//! use std::time::Duration;
//!
//! let mut cache = FileCache::new(SystemClock::new(), Duration::from_secs(1));
//! let bytes = cache.get_content("Cargo.toml")?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), filecache::error::CacheError>(())
//! ```

pub mod app;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod signal;
pub mod source;

pub use app::run_app;

//! Counters describing how requests were served.

use serde::Serialize;

/// How [`FileCache::get_content`](super::FileCache::get_content) calls were
/// resolved.
///
/// Counters are observability only; they are not part of the cached state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Served from the cache without touching storage.
    pub fast_hits: u64,
    /// Fingerprint rechecked and unchanged; content not re-read.
    pub fingerprint_hits: u64,
    /// First successful read of a previously unseen path.
    pub misses: u64,
    /// Fingerprint changed; content re-read and entry replaced.
    pub invalidations: u64,
    /// Calls that failed in a collaborator.
    pub failures: u64,
}

impl CacheStats {
    /// Total successful calls.
    #[must_use]
    pub fn requests(&self) -> u64 {
        self.fast_hits + self.fingerprint_hits + self.misses + self.invalidations
    }

    /// Number of content reads performed.
    #[must_use]
    pub fn reads(&self) -> u64 {
        self.misses + self.invalidations
    }
}

//! Cache entry definitions.

use std::sync::Arc;
use std::time::Duration;

/// Cached content for a single path.
///
/// Entries are created and replaced only by [`FileCache`](super::FileCache).
/// Outside code can inspect them but never mutate them.
#[derive(Debug, Clone)]
pub struct CacheEntry<F> {
    /// Clock reading of the last fingerprint check (or the initial read).
    checked_at: Duration,
    /// Fingerprint observed at `checked_at`.
    fingerprint: F,
    /// Content matching `fingerprint`.
    contents: Arc<[u8]>,
}

impl<F> CacheEntry<F> {
    pub(crate) fn new(checked_at: Duration, fingerprint: F, contents: Vec<u8>) -> Self {
        Self {
            checked_at,
            fingerprint,
            contents: contents.into(),
        }
    }

    /// When the fingerprint was last verified.
    #[must_use]
    pub fn checked_at(&self) -> Duration {
        self.checked_at
    }

    /// The fingerprint the cached content belongs to.
    #[must_use]
    pub fn fingerprint(&self) -> &F {
        &self.fingerprint
    }

    /// The cached bytes.
    #[must_use]
    pub fn contents(&self) -> &Arc<[u8]> {
        &self.contents
    }

    /// Whether `now` is still inside the window in which the entry is trusted
    /// without a fingerprint check.
    ///
    /// Strict: an elapsed time equal to `recheck_delay` triggers a recheck.
    #[must_use]
    pub fn is_within_window(&self, now: Duration, recheck_delay: Duration) -> bool {
        now.saturating_sub(self.checked_at) < recheck_delay
    }

    /// Record a successful fingerprint match at `now`.
    pub(crate) fn mark_checked(&mut self, now: Duration) {
        self.checked_at = now;
    }
}

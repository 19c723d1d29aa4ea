//! The polling file content cache.

use super::entry::CacheEntry;
use super::stats::CacheStats;
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheResult, ConfigError};
use crate::source::{ConfiguredSource, FileSource, MetadataSource};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Cache of file contents keyed by path.
///
/// Within `recheck_delay` of the last check, a path is served straight from
/// memory. After that, its fingerprint is recomputed: if unchanged, the check
/// time is refreshed; if changed, the content is re-read and the entry
/// replaced. Fingerprint equality alone decides whether content changed.
///
/// Entries are never evicted. The cache is single-threaded: every operation
/// takes `&mut self` and there is no internal locking.
///
/// # Example
///
/// ```no_run
/// use filecache::cache::FileCache;
/// use filecache::clock::SystemClock;
/// use std::time::Duration;
///
/// let mut cache = FileCache::new(SystemClock::new(), Duration::from_secs(2));
/// let config = cache.get_content("/etc/hosts")?;
/// println!("{} bytes", config.len());
/// # Ok::<(), filecache::error::CacheError>(())
/// ```
#[derive(Debug)]
pub struct FileCache<C, S = MetadataSource>
where
    S: FileSource,
{
    clock: C,
    recheck_delay: Duration,
    source: S,
    entries: HashMap<PathBuf, CacheEntry<S::Fingerprint>>,
    stats: CacheStats,
}

/// A cache assembled from [`CacheConfig`].
pub type ConfiguredFileCache = FileCache<SystemClock, ConfiguredSource>;

impl<C: Clock> FileCache<C, MetadataSource> {
    /// Create a cache using `stat` fingerprints and whole-file reads.
    #[must_use]
    pub fn new(clock: C, recheck_delay: Duration) -> Self {
        Self::with_source(clock, recheck_delay, MetadataSource)
    }
}

impl ConfiguredFileCache {
    /// Create a real-time cache with the configured delay and strategy.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        let recheck_delay = config.recheck_delay()?;
        let source = ConfiguredSource::from_kind(config.fingerprint);
        log::debug!(
            "Creating file cache (recheck delay {:?}, fingerprint {:?})",
            recheck_delay,
            config.fingerprint
        );
        Ok(Self::with_source(SystemClock::new(), recheck_delay, source))
    }
}

impl<C: Clock, S: FileSource> FileCache<C, S> {
    /// Create a cache with a custom fingerprint/read strategy.
    #[must_use]
    pub fn with_source(clock: C, recheck_delay: Duration, source: S) -> Self {
        Self {
            clock,
            recheck_delay,
            source,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Return the content of `path`, consulting storage only as needed.
    ///
    /// At most one fingerprint and one content read happen per call.
    ///
    /// # Errors
    ///
    /// Any failure from the fingerprint or read strategy is returned as is.
    /// The cached entry for `path`, if any, is left exactly as it was.
    pub fn get_content(&mut self, path: impl AsRef<Path>) -> CacheResult<Arc<[u8]>> {
        let path = path.as_ref();
        let now = self.clock.now();

        let mut changed = None;
        if let Some(entry) = self.entries.get_mut(path) {
            if entry.is_within_window(now, self.recheck_delay) {
                self.stats.fast_hits += 1;
                log::trace!("Serving {} from cache", path.display());
                return Ok(Arc::clone(entry.contents()));
            }

            match self.source.fingerprint(path) {
                Ok(fingerprint) if fingerprint == *entry.fingerprint() => {
                    entry.mark_checked(now);
                    self.stats.fingerprint_hits += 1;
                    log::trace!("Fingerprint unchanged for {}", path.display());
                    return Ok(Arc::clone(entry.contents()));
                }
                Ok(fingerprint) => {
                    log::debug!("Fingerprint changed for {}, re-reading", path.display());
                    changed = Some(fingerprint);
                }
                Err(err) => {
                    self.stats.failures += 1;
                    return Err(err);
                }
            }
        }

        let is_refresh = changed.is_some();
        let fingerprint = match changed {
            Some(fingerprint) => fingerprint,
            None => self.source.fingerprint(path).inspect_err(|_| {
                self.stats.failures += 1;
            })?,
        };
        let contents = self.source.read_contents(path).inspect_err(|_| {
            self.stats.failures += 1;
        })?;

        if is_refresh {
            self.stats.invalidations += 1;
        } else {
            self.stats.misses += 1;
            log::debug!("Cached {} ({} bytes)", path.display(), contents.len());
        }

        let entry = CacheEntry::new(now, fingerprint, contents);
        let contents = Arc::clone(entry.contents());
        self.entries.insert(path.to_path_buf(), entry);
        Ok(contents)
    }

    /// The configured recheck delay.
    #[must_use]
    pub fn recheck_delay(&self) -> Duration {
        self.recheck_delay
    }

    /// Number of cached paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` has an entry.
    #[must_use]
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    /// Inspect the entry for `path` without touching storage or the clock.
    #[must_use]
    pub fn entry(&self, path: impl AsRef<Path>) -> Option<&CacheEntry<S::Fingerprint>> {
        self.entries.get(path.as_ref())
    }

    /// Counters for how calls were served so far.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// The fingerprint/read strategy.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}

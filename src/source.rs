//! Fingerprint and content-read strategies.
//!
//! A [`FileSource`] answers two questions about a path: "what does the file
//! look like right now?" (an equality-comparable fingerprint) and "what are
//! its bytes?". The cache never touches the filesystem directly.
//!
//! # Strategies
//!
//! - [`MetadataSource`]: fingerprint from `stat` metadata (inode, size, mtime,
//!   ctime). Cheap, and the default.
//! - [`ContentHashSource`]: fingerprint is the BLAKE3 digest of the content.
//!   Immune to mtime games, but every recheck reads the whole file.
//! - [`ConfiguredSource`]: picks one of the above at runtime from
//!   [`FingerprintKind`].

use crate::config::FingerprintKind;
use crate::error::{CacheError, CacheResult};
use std::fmt::Debug;
use std::fs::{File, Metadata};
use std::io::Read;
use std::path::Path;
use std::time::SystemTime;
#[cfg(unix)]
use std::time::{Duration, UNIX_EPOCH};

/// Buffer size for streaming content hashes.
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Capability used by the cache to observe files.
///
/// Both operations must fail (rather than return a placeholder) when the file
/// is inaccessible.
pub trait FileSource {
    /// Opaque identity snapshot. Equality is the only thing the cache asks of it.
    type Fingerprint: PartialEq + Debug;

    /// Compute the current fingerprint for `path`.
    fn fingerprint(&self, path: &Path) -> CacheResult<Self::Fingerprint>;

    /// Read the full content of `path`.
    fn read_contents(&self, path: &Path) -> CacheResult<Vec<u8>>;
}

/// Read a whole file through a scoped handle.
///
/// The handle is dropped on every exit path, including a failed read.
pub fn read_whole_file(path: &Path) -> CacheResult<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| CacheError::from_io(path, e))?;
    let capacity = file
        .metadata()
        .map(|m| usize::try_from(m.len()).unwrap_or(0))
        .unwrap_or(0);
    let mut buf = Vec::with_capacity(capacity);
    file.read_to_end(&mut buf)
        .map_err(|e| CacheError::from_io(path, e))?;
    Ok(buf)
}

/// Snapshot of a file's `stat` metadata.
///
/// Two stamps compare equal when the file is (very probably) unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileStamp {
    /// (device, inode) on Unix; `None` where the platform has no inode.
    pub inode: Option<(u64, u64)>,
    /// File size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: Option<SystemTime>,
    /// Status change time on Unix, creation time elsewhere.
    pub changed: Option<SystemTime>,
}

impl FileStamp {
    /// Build a stamp from already-fetched metadata.
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            inode: inode_of(metadata),
            size: metadata.len(),
            modified: metadata.modified().ok(),
            changed: changed_of(metadata),
        }
    }
}

#[cfg(unix)]
fn inode_of(metadata: &Metadata) -> Option<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    Some((metadata.dev(), metadata.ino()))
}

#[cfg(not(unix))]
fn inode_of(_metadata: &Metadata) -> Option<(u64, u64)> {
    None
}

#[cfg(unix)]
fn changed_of(metadata: &Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    let nanos = Duration::from_nanos(u64::try_from(metadata.ctime_nsec()).ok()?);
    let secs = metadata.ctime();
    if secs >= 0 {
        UNIX_EPOCH.checked_add(Duration::from_secs(secs.unsigned_abs()) + nanos)
    } else {
        UNIX_EPOCH
            .checked_sub(Duration::from_secs(secs.unsigned_abs()))?
            .checked_add(nanos)
    }
}

#[cfg(not(unix))]
fn changed_of(metadata: &Metadata) -> Option<SystemTime> {
    metadata.created().ok()
}

/// Default strategy: `stat` fingerprint, whole-file read.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataSource;

impl FileSource for MetadataSource {
    type Fingerprint = FileStamp;

    fn fingerprint(&self, path: &Path) -> CacheResult<FileStamp> {
        let metadata = std::fs::metadata(path).map_err(|e| CacheError::from_io(path, e))?;
        Ok(FileStamp::from_metadata(&metadata))
    }

    fn read_contents(&self, path: &Path) -> CacheResult<Vec<u8>> {
        read_whole_file(path)
    }
}

/// Content-hash strategy: the fingerprint is the BLAKE3 digest of the bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHashSource;

impl ContentHashSource {
    /// Stream `path` through BLAKE3.
    pub fn digest(path: &Path) -> CacheResult<blake3::Hash> {
        let mut file = File::open(path).map_err(|e| CacheError::from_io(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buf = vec![0u8; HASH_BUFFER_SIZE];
        loop {
            let n = file
                .read(&mut buf)
                .map_err(|e| CacheError::from_io(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hasher.finalize())
    }
}

impl FileSource for ContentHashSource {
    type Fingerprint = blake3::Hash;

    fn fingerprint(&self, path: &Path) -> CacheResult<blake3::Hash> {
        Self::digest(path)
    }

    fn read_contents(&self, path: &Path) -> CacheResult<Vec<u8>> {
        read_whole_file(path)
    }
}

/// Fingerprint produced by a [`ConfiguredSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum SourceFingerprint {
    /// From [`MetadataSource`].
    Stamp(FileStamp),
    /// From [`ContentHashSource`].
    Digest(blake3::Hash),
}

/// Strategy chosen at runtime, e.g. from a config file.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredSource {
    /// `stat`-based fingerprints.
    Metadata(MetadataSource),
    /// BLAKE3 content fingerprints.
    ContentHash(ContentHashSource),
}

impl ConfiguredSource {
    /// Build the strategy named by `kind`.
    #[must_use]
    pub fn from_kind(kind: FingerprintKind) -> Self {
        match kind {
            FingerprintKind::Metadata => Self::Metadata(MetadataSource),
            FingerprintKind::ContentHash => Self::ContentHash(ContentHashSource),
        }
    }

    /// Which strategy this is.
    #[must_use]
    pub fn kind(&self) -> FingerprintKind {
        match self {
            Self::Metadata(_) => FingerprintKind::Metadata,
            Self::ContentHash(_) => FingerprintKind::ContentHash,
        }
    }
}

impl FileSource for ConfiguredSource {
    type Fingerprint = SourceFingerprint;

    fn fingerprint(&self, path: &Path) -> CacheResult<SourceFingerprint> {
        match self {
            Self::Metadata(source) => source.fingerprint(path).map(SourceFingerprint::Stamp),
            Self::ContentHash(source) => source.fingerprint(path).map(SourceFingerprint::Digest),
        }
    }

    fn read_contents(&self, path: &Path) -> CacheResult<Vec<u8>> {
        read_whole_file(path)
    }
}

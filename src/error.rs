//! Error types and exit codes.
//!
//! The library reports collaborator failures through [`CacheError`] and
//! configuration problems through [`ConfigError`]. The binary wraps both in
//! `anyhow` and maps them onto an [`ExitCode`].

use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while fingerprinting or reading a file.
///
/// These are always propagated to the caller of
/// [`FileCache::get_content`](crate::cache::FileCache::get_content) and never
/// leave a partial entry behind.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    /// The file does not exist.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when accessing the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    /// Classify an I/O error raised for `path`.
    #[must_use]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// The path the failure refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) => path,
            Self::Io { path, .. } => path,
        }
    }
}

/// Result alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors raised while loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The recheck delay is negative, NaN, infinite or too large for a `Duration`.
    #[error(
        "Invalid recheck delay: {0} (must be a non-negative number of seconds, at most {max})",
        max = u64::MAX
    )]
    InvalidRecheckDelay(f64),

    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    MissingFile(PathBuf),

    /// The watch interval is zero.
    #[error("Invalid watch interval: must be greater than 0 ms")]
    InvalidWatchInterval,

    /// Layered extraction failed (bad TOML, wrong types in env vars, ...).
    #[error("Failed to load configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

/// Exit codes for the `filecache` binary.
///
/// - 0: Success
/// - 1: General error (unexpected failure, bad configuration)
/// - 2: Access error (a file could not be fingerprinted or read)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: all requested files were served.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Access error: a file was missing or unreadable.
    AccessError = 2,
    /// Interrupted: the watch loop was stopped by Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "FC000",
            Self::GeneralError => "FC001",
            Self::AccessError => "FC002",
            Self::Interrupted => "FC130",
        }
    }

    /// Pick the exit code for an error returned by [`run_app`](crate::run_app).
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.chain().any(|cause| cause.is::<CacheError>()) {
            Self::AccessError
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "FC002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Path involved in the failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        let path = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<CacheError>())
            .map(|e| e.path().to_path_buf());
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
            path,
        }
    }
}

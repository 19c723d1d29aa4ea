//! Command-line interface definitions.
//!
//! # Example
//!
//! ```bash
//! # Print files through one cache (repeated paths are served from memory)
//! filecache cat notes.txt notes.txt --stats
//!
//! # Print a file every time its content changes
//! filecache --recheck-delay 0.5 watch app.log --interval 200
//!
//! # Fingerprint by content hash instead of metadata
//! filecache --fingerprint content-hash watch settings.toml
//! ```

use crate::config::{CacheConfig, FingerprintKind};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Polling file content cache.
///
/// Serves file contents from memory, re-checking a file's fingerprint at most
/// once per recheck delay and re-reading it only when the fingerprint changes.
#[derive(Debug, Parser)]
#[command(name = "filecache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Seconds to trust cached content before re-checking the fingerprint
    #[arg(long, value_name = "SECS", global = true)]
    pub recheck_delay: Option<f64>,

    /// How to fingerprint files
    #[arg(long, value_enum, global = true)]
    pub fingerprint: Option<FingerprintKind>,

    /// Report errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply flags on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut CacheConfig) {
        if let Some(delay) = self.recheck_delay {
            config.recheck_delay_secs = delay;
        }
        if let Some(kind) = self.fingerprint {
            config.fingerprint = kind;
        }
        if let Commands::Watch(WatchArgs {
            interval: Some(ms), ..
        }) = &self.command
        {
            config.watch_interval_ms = *ms;
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print files to stdout through a single cache
    Cat(CatArgs),
    /// Poll a file and print it whenever its content changes
    Watch(WatchArgs),
}

/// Arguments for `cat`.
#[derive(Debug, Args)]
pub struct CatArgs {
    /// Files to print, in order (may repeat)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Print cache statistics as JSON to stderr when done
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for `watch`.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// File to watch
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Poll interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Stop after this many polls
    #[arg(long, value_name = "N")]
    pub max_polls: Option<u64>,

    /// Print cache statistics as JSON to stderr when done
    #[arg(long)]
    pub stats: bool,
}

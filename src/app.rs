//! Command execution for the `filecache` binary.

use crate::cache::{CacheStats, ConfiguredFileCache};
use crate::cli::{CatArgs, Cli, Commands, WatchArgs};
use crate::config::CacheConfig;
use crate::error::ExitCode;
use crate::logging::init_logging;
use crate::signal::{install_handler, ShutdownHandler};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;

/// Run the parsed command line against stdout.
///
/// Initializes logging, loads the layered configuration and applies CLI
/// overrides before dispatching.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    init_logging(cli.verbose, cli.quiet);

    let mut config = CacheConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_config(&cli, &config, &mut out)
}

/// Run a command with an already-resolved configuration, writing file
/// contents to `out`.
pub fn run_with_config<W: Write>(cli: &Cli, config: &CacheConfig, out: &mut W) -> Result<ExitCode> {
    let mut cache = ConfiguredFileCache::from_config(config)?;
    match &cli.command {
        Commands::Cat(args) => run_cat(&mut cache, args, out),
        Commands::Watch(args) => {
            let shutdown = install_handler();
            run_watch(&mut cache, args, config, &shutdown, out)
        }
    }
}

fn run_cat<W: Write>(cache: &mut ConfiguredFileCache, args: &CatArgs, out: &mut W) -> Result<ExitCode> {
    for path in &args.paths {
        let content = cache
            .get_content(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        out.write_all(&content)?;
    }
    out.flush()?;

    if args.stats {
        report_stats(&cache.stats())?;
    }
    Ok(ExitCode::Success)
}

/// Poll `args.path` until interrupted or `max_polls` is reached, printing the
/// content whenever it differs from what was printed last.
///
/// A failing poll is logged and retried on the next tick.
pub fn run_watch<W: Write>(
    cache: &mut ConfiguredFileCache,
    args: &WatchArgs,
    config: &CacheConfig,
    shutdown: &ShutdownHandler,
    out: &mut W,
) -> Result<ExitCode> {
    let interval = config.watch_interval();
    let mut last: Option<Arc<[u8]>> = None;
    let mut polls: u64 = 0;

    log::info!(
        "Watching {} every {:?} (recheck delay {:?})",
        args.path.display(),
        interval,
        cache.recheck_delay()
    );

    let code = loop {
        if shutdown.is_shutdown_requested() {
            break ExitCode::Interrupted;
        }

        match cache.get_content(&args.path) {
            Ok(content) => {
                if last.as_deref() != Some(&*content) {
                    out.write_all(&content)?;
                    out.flush()?;
                    last = Some(content);
                }
            }
            Err(e) => log::warn!("{}", e),
        }

        polls += 1;
        if args.max_polls.is_some_and(|max| polls >= max) {
            break ExitCode::Success;
        }
        thread::sleep(interval);
    };

    if args.stats {
        report_stats(&cache.stats())?;
    }
    Ok(code)
}

fn report_stats(stats: &CacheStats) -> Result<()> {
    let json = serde_json::to_string(stats).context("Failed to serialize cache statistics")?;
    eprintln!("{}", json);
    Ok(())
}

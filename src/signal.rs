//! Ctrl+C handling for the `watch` loop.
//!
//! The handler only flips an atomic flag; the loop checks it between polls,
//! so a poll that is already running always finishes.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared "stop requested" flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// A handler with no shutdown requested and no signal hook.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether Ctrl+C was pressed or [`request_shutdown`](Self::request_shutdown) called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Ask the loop to stop after the current poll.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C hook and return its handler.
///
/// `ctrlc` allows one hook per process, so repeated calls (tests calling
/// `run_app` several times) get the same handler back with its flag cleared.
/// If the hook cannot be installed at all, an unhooked handler is returned;
/// it still honours [`ShutdownHandler::request_shutdown`].
#[must_use]
pub fn install_handler() -> ShutdownHandler {
    let handler = GLOBAL_HANDLER
        .get_or_init(|| {
            let handler = ShutdownHandler::new();
            let flag = Arc::clone(&handler.flag);
            if let Err(e) = ctrlc::set_handler(move || {
                flag.store(true, Ordering::SeqCst);
                let _ = writeln!(std::io::stderr(), "\nInterrupted.");
                log::info!("Shutdown signal received");
            }) {
                log::debug!("Ctrl+C handler not installed: {}", e);
            }
            handler
        })
        .clone();
    handler.reset();
    handler
}

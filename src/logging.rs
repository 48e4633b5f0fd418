//! logging
//!
//! Diagnostic logging setup shared by both binaries.
//!
//! Diagnostics go to stderr through `tracing`. `--debug` turns on debug
//! output for this crate; otherwise `RUST_LOG` decides, defaulting to
//! warnings only. Command output never goes through here.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("memex_git=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Tracing setup
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the host. [`init`] is the convenience for hosts that want stderr output
//! filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "prompt_library_core=info";

/// Install a formatting subscriber on stderr
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

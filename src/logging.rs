//! Tracing setup
//!
//! Logs go to stderr so they never interleave with the prompts on stdout.
//!
//! Usage:
//!   gymdb --debug               # Debug logging
//!   RUST_LOG=gymdb=trace gymdb  # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the stderr subscriber
///
/// `RUST_LOG` wins when set; otherwise `debug` or `info`.
pub fn init_tracing(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

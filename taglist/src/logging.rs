//! Log output for the CLI.
//!
//! `RUST_LOG` wins when set; otherwise `-v` flags raise the level of
//! taglist's own targets while everything else stays at `warn`.

use crate::context::VerbosityLevel;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for a verbosity level.
pub fn directive(verbosity: VerbosityLevel) -> String {
    let level = verbosity.as_level();
    format!("warn,taglist={level},libtaglist={level}")
}

/// Install the global subscriber, writing to stderr.
pub fn init(verbosity: VerbosityLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(verbosity)));

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

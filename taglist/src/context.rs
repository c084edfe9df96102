//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values
//! 3. Environment variables
//! 4. CLI flags
//!
//! Once built, the context is passed as read-only throughout the application.

use libtaglist::{Config, Result, TaglistError};
use std::env;
use std::path::Path;

/// Overrides the network timeout (seconds)
pub const TIMEOUT_ENV: &str = "TAGLIST_TIMEOUT";

/// Verbosity level derived from the number of `-v` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl VerbosityLevel {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Level used for taglist's own log targets.
    pub fn as_level(&self) -> &'static str {
        match self {
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved configuration
    pub config: Config,
}

impl AppContext {
    /// Build context from the optional config file and the environment.
    pub fn build(config_path: Option<&Path>) -> Result<Self> {
        let timeout = env::var(TIMEOUT_ENV).ok();
        Self::resolve(config_path, timeout.as_deref())
    }

    /// Build context from explicit sources.
    pub fn resolve(config_path: Option<&Path>, timeout_override: Option<&str>) -> Result<Self> {
        let mut config = Config::load(config_path)?;

        if let Some(raw) = timeout_override {
            config.network.timeout = raw.trim().parse().map_err(|_| {
                TaglistError::validation(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    TIMEOUT_ENV, raw
                ))
            })?;
        }

        Ok(Self { config })
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

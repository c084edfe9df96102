//! Error types for taglist
//!
//! Only faults live here. HTTP error statuses, including a 401 that survived
//! every retry, are returned as [`HttpResponse`](crate::http::HttpResponse)
//! values and never become a `TaglistError`.

use thiserror::Error;

#[cfg(test)]
mod tests;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for taglist operations
#[derive(Error, Debug)]
pub enum TaglistError {
    /// Transport failures (DNS, connection refused, timeout, TLS)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Missing or malformed `Www-Authenticate` challenge
    #[error("Invalid authentication challenge: {message}")]
    Challenge { message: String },

    /// Token service answered with something other than `{"token": ...}`
    #[error("Token error: {message}")]
    Token {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Registry payload could not be decoded as JSON
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Invalid caller input (bad method name, empty image name, ...)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors (invalid config file, missing settings)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },
}

/// Result type alias for taglist operations
pub type Result<T> = std::result::Result<T, TaglistError>;

impl TaglistError {
    /// Creates a new network error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtaglist::error::TaglistError;
    ///
    /// let err = TaglistError::network("connection refused");
    /// assert!(matches!(err, TaglistError::Network { .. }));
    /// ```
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new network error with a source error.
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new challenge error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtaglist::error::TaglistError;
    ///
    /// let err = TaglistError::challenge("missing realm");
    /// assert!(matches!(err, TaglistError::Challenge { .. }));
    /// ```
    pub fn challenge<S: Into<String>>(message: S) -> Self {
        Self::Challenge {
            message: message.into(),
        }
    }

    /// Creates a new token error.
    pub fn token<S: Into<String>>(message: S) -> Self {
        Self::Token {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new token error with a source error.
    pub fn token_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Token {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new decode error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtaglist::error::TaglistError;
    ///
    /// let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    /// let err = TaglistError::decode_with_source("bad tag list", json_err);
    /// assert!(matches!(err, TaglistError::Decode { .. }));
    /// ```
    pub fn decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new configuration error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtaglist::error::TaglistError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    /// let err = TaglistError::config_with_source("failed to read config", Some("/etc/taglist.yaml"), io_err);
    /// assert!(matches!(err, TaglistError::Config { .. }));
    /// ```
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }
}

impl From<config::ConfigError> for TaglistError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_with_source("Failed to build configuration", None::<&str>, err)
    }
}

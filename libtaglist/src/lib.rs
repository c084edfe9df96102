//! taglist - Docker Registry tag listing
//!
//! libtaglist lists the tags of an image repository on any registry that
//! speaks the Docker Registry HTTP API v2, negotiating the bearer-token
//! challenge on the way.
//!
//! # Quick Start
//!
//! ```no_run
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Tags of the official alpine image on Docker Hub
//!     let tags = libtaglist::list_tags("alpine", None, None)?;
//!     for tag in tags.unwrap_or_default() {
//!         println!("{}", tag);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`RegistryClient`] - Registry requests with the token handshake
//! - [`RegistryAliases`] - Registry name to hostname table
//! - [`Config`] - YAML configuration
//! - [`TaglistError`] - Fatal errors
//!
//! HTTP error statuses are not errors: [`RegistryClient::request`] returns
//! them as [`HttpResponse`] values. Tag lists are not paginated; only the
//! first page a registry returns is listed.

#![warn(clippy::all)]

/// Repository namespace of official single-name images.
pub const DEFAULT_REPO: &str = "library";

/// Registry used when none is given.
pub const DEFAULT_REGISTRY: &str = "docker.io";

/// Returns the libtaglist crate version.
///
/// # Examples
///
/// ```
/// let version = libtaglist::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Lists the tags of an image with a default client.
///
/// `repo` defaults to [`DEFAULT_REPO`] and `registry` to [`DEFAULT_REGISTRY`].
/// Returns `None` when the registry's reply carries no tag list.
pub fn list_tags(
    image: &str,
    repo: Option<&str>,
    registry: Option<&str>,
) -> Result<Option<Vec<String>>> {
    RegistryClient::new()?.list_tags(
        image,
        repo.unwrap_or(DEFAULT_REPO),
        registry.unwrap_or(DEFAULT_REGISTRY),
    )
}

pub use auth::AuthChallenge;
pub use config::Config;
pub use error::{Result, TaglistError};
pub use http::{Headers, HttpResponse};
pub use registry::{MAX_ATTEMPTS, RegistryAliases, RegistryClient, TagsOutcome};

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod registry;

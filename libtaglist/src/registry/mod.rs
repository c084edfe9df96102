//! Registry request orchestration.
//!
//! [`RegistryClient`] issues Docker Registry v2 API requests and handles the
//! bearer-token handshake: a 401 carries a `Www-Authenticate` challenge, the
//! client fetches a token from the challenge's realm and retries with
//! `Authorization: Bearer <token>`. The loop makes at most [`MAX_ATTEMPTS`]
//! registry requests; after that the last 401 is handed back as data.

use crate::auth::{AuthChallenge, TokenResponse};
use crate::config::{Config, Registries};
use crate::error::{Result, TaglistError};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportConfig};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};


/// Upper bound on registry requests per logical call (1 initial + 3 retries).
pub const MAX_ATTEMPTS: u32 = 4;

const UNAUTHORIZED: u16 = 401;

/// Immutable table mapping registry names to hostnames.
///
/// Names without an entry resolve to themselves.
///
/// # Examples
///
/// ```
/// use libtaglist::registry::RegistryAliases;
///
/// let aliases = RegistryAliases::default();
/// assert_eq!(aliases.resolve("docker.io"), "index.docker.io");
/// assert_eq!(aliases.resolve("quay.io"), "quay.io");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryAliases {
    hosts: HashMap<String, String>,
    insecure: HashSet<String>,
}

impl Default for RegistryAliases {
    fn default() -> Self {
        Self::empty().with_alias("docker.io", "index.docker.io")
    }
}

impl RegistryAliases {
    /// A table with no aliases at all.
    pub fn empty() -> Self {
        Self {
            hosts: HashMap::new(),
            insecure: HashSet::new(),
        }
    }

    pub fn with_alias(mut self, name: impl Into<String>, host: impl Into<String>) -> Self {
        self.hosts.insert(name.into(), host.into());
        self
    }

    /// Marks a resolved host as reachable only over plain http.
    pub fn with_insecure(mut self, host: impl Into<String>) -> Self {
        self.insecure.insert(host.into());
        self
    }

    /// Builds the default table extended with configured entries.
    ///
    /// A configured name overrides a built-in alias of the same name.
    pub fn from_config(registries: &Registries) -> Self {
        let aliases = registries
            .aliases
            .iter()
            .fold(Self::default(), |aliases, (name, host)| {
                aliases.with_alias(name.as_str(), host.as_str())
            });
        registries
            .insecure
            .iter()
            .fold(aliases, |aliases, host| aliases.with_insecure(host.as_str()))
    }

    /// Resolves a registry name to its hostname.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.hosts.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn is_insecure(&self, host: &str) -> bool {
        self.insecure.contains(host)
    }
}

/// Decoded `tags/list` payload.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TagList {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Result of a tag listing that reached the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagsOutcome {
    /// Tags in server order
    Listed(Vec<String>),
    /// Successful reply without a `tags` list
    NoTags,
    /// Final reply was an error status (401 after exhausted retries, 404, ...)
    Status { status: u16, error_count: u32 },
}

impl TagsOutcome {
    pub fn into_tags(self) -> Option<Vec<String>> {
        match self {
            TagsOutcome::Listed(tags) => Some(tags),
            TagsOutcome::NoTags | TagsOutcome::Status { .. } => None,
        }
    }
}

/// Client for a Docker Registry v2 API.
///
/// # Examples
///
/// ```no_run
/// use libtaglist::registry::RegistryClient;
///
/// # fn main() -> libtaglist::Result<()> {
/// let client = RegistryClient::new()?;
/// let tags = client.list_tags("alpine", "library", "docker.io")?;
/// for tag in tags.unwrap_or_default() {
///     println!("{}", tag);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RegistryClient<T = HttpTransport> {
    transport: T,
    aliases: RegistryAliases,
}

impl RegistryClient<HttpTransport> {
    /// Creates a client with the default transport and alias table.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(
            HttpTransport::new()?,
            RegistryAliases::default(),
        ))
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::with_config(
            TransportConfig::new().with_timeout(config.network.timeout),
        )?;
        Ok(Self::with_transport(
            transport,
            RegistryAliases::from_config(&config.registries),
        ))
    }
}

impl<T: Transport> RegistryClient<T> {
    pub fn with_transport(transport: T, aliases: RegistryAliases) -> Self {
        Self { transport, aliases }
    }

    pub fn aliases(&self) -> &RegistryAliases {
        &self.aliases
    }

    /// Builds `<scheme>://<host>/v2/<endpoint>` for a registry name.
    pub fn endpoint_url(&self, registry: &str, endpoint: &str) -> String {
        let host = self.aliases.resolve(registry);
        let scheme = if self.aliases.is_insecure(host) {
            "http"
        } else {
            "https"
        };
        format!("{}://{}/v2/{}", scheme, host, endpoint.trim_start_matches('/'))
    }

    /// Performs a GET against a registry API endpoint, answering bearer
    /// challenges along the way.
    ///
    /// Any status other than 401 is returned as-is, errors included. A 401
    /// is returned only once [`MAX_ATTEMPTS`] requests have been made.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The registry or token service is unreachable
    /// - A 401 carries a missing or malformed `Www-Authenticate` header
    /// - The token service reply has no `token`
    pub fn request(&self, endpoint: &str, registry: &str) -> Result<HttpResponse> {
        let url = self.endpoint_url(registry, endpoint);
        let mut token: Option<TokenResponse> = None;
        let mut error_count = 0;
        let mut attempt = 1;

        loop {
            let mut request = HttpRequest::get(url.as_str()).with_error_count(error_count);
            if let Some(token) = &token {
                request = request.with_header("Authorization", token.to_header_value());
            }

            debug!(
                attempt,
                url = %url,
                authenticated = token.is_some(),
                "registry request"
            );
            let response = self.transport.send(&request)?;

            if response.status() != UNAUTHORIZED {
                return Ok(response);
            }

            if attempt >= MAX_ATTEMPTS {
                warn!(
                    url = %url,
                    attempts = attempt,
                    error_count = response.error_count(),
                    "registry still unauthorized, giving up"
                );
                return Ok(response);
            }

            let challenge = AuthChallenge::from_headers(response.headers())?;
            debug!(
                realm = %challenge.realm,
                service = %challenge.service,
                scope = %challenge.scope,
                "received bearer challenge"
            );
            token = Some(self.fetch_token(&challenge)?);
            error_count = response.error_count();
            attempt += 1;
        }
    }

    /// Requests a token from the challenge's realm without credentials.
    pub fn fetch_token(&self, challenge: &AuthChallenge) -> Result<TokenResponse> {
        let request = challenge.token_request();
        debug!(url = %request.target_url(), "fetching bearer token");
        let response = self.transport.send(&request)?;
        TokenResponse::from_response(&response)
    }

    /// Lists the tags of `<repo>/<image>` in server order.
    ///
    /// Only the first page is returned; `Link` continuation headers are not
    /// followed. An error status on the final response (including a 401
    /// after [`MAX_ATTEMPTS`]) is reported as [`TagsOutcome::Status`] rather
    /// than a fault.
    ///
    /// An empty `repo` addresses `image` directly, for registries without
    /// namespaces.
    pub fn tags(&self, image: &str, repo: &str, registry: &str) -> Result<TagsOutcome> {
        if image.trim().is_empty() {
            return Err(TaglistError::validation("Image name cannot be empty"));
        }

        let endpoint = if repo.is_empty() {
            format!("{}/tags/list", image)
        } else {
            format!("{}/{}/tags/list", repo, image)
        };

        let response = self.request(&endpoint, registry)?;

        if !response.is_success() {
            warn!(
                registry,
                endpoint = %endpoint,
                status = response.status(),
                error_count = response.error_count(),
                "registry answered with an error status"
            );
            return Ok(TagsOutcome::Status {
                status: response.status(),
                error_count: response.error_count(),
            });
        }

        if response.body().trim().is_empty() {
            debug!(status = response.status(), "registry returned an empty payload");
            return Ok(TagsOutcome::NoTags);
        }

        let tag_list: TagList = response.json()?;
        Ok(tag_list.tags.map_or(TagsOutcome::NoTags, TagsOutcome::Listed))
    }

    /// Like [`tags`](Self::tags), collapsing every outcome without a tag
    /// list to `None`.
    pub fn list_tags(&self, image: &str, repo: &str, registry: &str) -> Result<Option<Vec<String>>> {
        self.tags(image, repo, registry).map(TagsOutcome::into_tags)
    }
}

//! Single-shot HTTP request executor.
//!
//! This module performs exactly one HTTP request per call and normalizes the
//! outcome into an [`HttpResponse`]. Error statuses (4xx/5xx) are returned as
//! data with an empty body so callers can inspect a 401 without matching on
//! errors; only transport failures surface as [`TaglistError::Network`].
//!
//! The [`Transport`] trait is the seam between the registry logic and the
//! network. [`HttpTransport`] is the blocking reqwest implementation.

use crate::error::{Result, TaglistError};
use reqwest::Method;
use reqwest::blocking::Client as ReqwestClient;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

mod headers;

pub use headers::Headers;


/// Form-encodes key/value pairs, keeping order and repeated keys.
///
/// Spaces become `+` and `/` is left unescaped; everything else outside the
/// unreserved set is percent-encoded.
///
/// # Examples
///
/// ```
/// use libtaglist::http::encode_form;
///
/// let encoded = encode_form(&[("scope", "repository:library/alpine:pull")]);
/// assert_eq!(encoded, "scope=repository%3Alibrary/alpine%3Apull");
/// ```
pub fn encode_form<K, V>(data: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(data.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish();
    // A literal '%' is always emitted as %25, so %2F can only come from '/'.
    encoded.replace("%2F", "/")
}

/// A single outgoing HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: String,
    data: Vec<(String, String)>,
    headers: Headers,
    error_count: u32,
}

impl HttpRequest {
    /// Creates a request with a case-insensitive method name.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtaglist::http::HttpRequest;
    ///
    /// let request = HttpRequest::new("post", "https://example.com/form").unwrap();
    /// assert_eq!(request.method().as_str(), "POST");
    /// ```
    pub fn new(method: &str, url: impl Into<String>) -> Result<Self> {
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|_| TaglistError::validation(format!("Invalid HTTP method: {:?}", method)))?;

        Ok(Self {
            method,
            url: url.into(),
            data: Vec::new(),
            headers: Headers::new(),
            error_count: 0,
        })
    }

    /// Creates a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            data: Vec::new(),
            headers: Headers::new(),
            error_count: 0,
        }
    }

    /// Adds a form field. Repeating a key adds another value.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the authentication failure count inherited from earlier attempts.
    pub fn with_error_count(mut self, error_count: u32) -> Self {
        self.error_count = error_count;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The URL as given, without any encoded query.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn data(&self) -> &[(String, String)] {
        &self.data
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// The URL actually requested. For GET, form data is appended as a query.
    pub fn target_url(&self) -> String {
        if self.method != Method::GET || self.data.is_empty() {
            return self.url.clone();
        }

        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, encode_form(&self.data))
    }

    /// The form-encoded body, present only for non-GET requests with data.
    pub fn body(&self) -> Option<String> {
        if self.method == Method::GET || self.data.is_empty() {
            None
        } else {
            Some(encode_form(&self.data))
        }
    }
}

/// Normalized result of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    body: String,
    headers: Headers,
    status: u16,
    error_count: u32,
}

impl HttpResponse {
    /// Builds a response that carries a body.
    pub fn new(status: u16, headers: Headers, body: impl Into<String>, error_count: u32) -> Self {
        Self {
            body: body.into(),
            headers,
            status,
            error_count,
        }
    }

    /// Builds the response for an HTTP error status.
    ///
    /// The body is empty and the error count is one more than the inherited one.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtaglist::http::{Headers, HttpResponse};
    ///
    /// let response = HttpResponse::error(401, Headers::new(), 2);
    /// assert_eq!(response.error_count(), 3);
    /// assert!(response.body().is_empty());
    /// ```
    pub fn error(status: u16, headers: Headers, inherited_error_count: u32) -> Self {
        Self {
            body: String::new(),
            headers,
            status,
            error_count: inherited_error_count + 1,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Consecutive authentication failures on this request chain.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            TaglistError::decode_with_source(
                format!("Response body (status {}) is not valid JSON", self.status),
                e,
            )
        })
    }
}

/// Sends one request and returns its normalized response.
///
/// Implementations must not retry and must report HTTP error statuses as
/// [`HttpResponse::error`] values rather than `Err`.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

/// Configuration for [`HttpTransport`].
///
/// # Examples
///
/// ```
/// use libtaglist::http::TransportConfig;
///
/// let config = TransportConfig::new().with_timeout(60);
/// assert_eq!(config.timeout_seconds, 60);
/// ```
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("taglist/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Blocking HTTP transport built on reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: ReqwestClient,
    timeout_seconds: u64,
}

impl HttpTransport {
    /// Creates a transport with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| TaglistError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Translates a reqwest error into a TaglistError.
    fn translate_reqwest_error(&self, error: reqwest::Error, url: &str) -> TaglistError {
        if error.is_timeout() {
            TaglistError::network_with_source(
                format!(
                    "Request to {} timed out after {} seconds",
                    url, self.timeout_seconds
                ),
                error,
            )
        } else if error.is_connect() {
            TaglistError::network_with_source(format!("Failed to connect to {}", url), error)
        } else if error.is_builder() {
            TaglistError::network_with_source(format!("Invalid request for {}", url), error)
        } else {
            TaglistError::network_with_source(format!("Network error communicating with {}", url), error)
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = request.target_url();
        debug!(method = %request.method(), url = %url, "sending request");

        let mut builder = self.http_client.request(request.method().clone(), &url);
        for (name, value) in request.headers().iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body);
        }

        let response = builder
            .send()
            .map_err(|e| self.translate_reqwest_error(e, &url))?;

        let status = response.status();
        let headers = Headers::from_header_map(response.headers());

        if status.is_client_error() || status.is_server_error() {
            debug!(status = status.as_u16(), url = %url, "request returned error status");
            return Ok(HttpResponse::error(
                status.as_u16(),
                headers,
                request.error_count(),
            ));
        }

        // text() honours the charset in Content-Type and falls back to UTF-8
        let body = response.text().map_err(|e| {
            TaglistError::network_with_source(format!("Failed to read response from {}", url), e)
        })?;

        Ok(HttpResponse::new(
            status.as_u16(),
            headers,
            body,
            request.error_count(),
        ))
    }
}

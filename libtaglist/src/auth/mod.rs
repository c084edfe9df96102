//! Bearer-token challenge handling.
//!
//! A registry that wants a token answers with 401 and a header such as
//!
//! ```text
//! Www-Authenticate: Bearer realm="https://auth.docker.io/token",service="registry.docker.io",scope="repository:library/alpine:pull"
//! ```
//!
//! This module parses that header into an [`AuthChallenge`] and decodes the
//! token service's `{"token": "..."}` reply. Parsing is deliberately naive:
//! values containing escaped quotes or commas are not supported.

use crate::error::{Result, TaglistError};
use crate::http::{Headers, HttpRequest, HttpResponse};
use serde::Deserialize;


/// Name of the challenge header. Lookups are case-insensitive.
pub const WWW_AUTHENTICATE: &str = "www-authenticate";

/// Splits a `Www-Authenticate` value into its `key="value"` parameters.
///
/// The scheme is dropped. Parameters are returned in header order.
///
/// # Examples
///
/// ```
/// use libtaglist::auth::parse_params;
///
/// let params = parse_params(r#"Bearer realm="https://auth.example/token",service="reg""#).unwrap();
/// assert_eq!(params[0], ("realm".to_string(), "https://auth.example/token".to_string()));
/// ```
pub fn parse_params(header: &str) -> Result<Vec<(String, String)>> {
    let (_, params) = split_scheme(header)?;

    params
        .split(',')
        .map(|param| {
            let (key, value) = param.split_once('=').ok_or_else(|| {
                TaglistError::challenge(format!("parameter {:?} has no '=' separator", param))
            })?;
            Ok((
                key.trim().to_string(),
                value.trim().trim_matches('"').to_string(),
            ))
        })
        .collect()
}

fn split_scheme(header: &str) -> Result<(&str, &str)> {
    header
        .trim()
        .split_once(char::is_whitespace)
        .map(|(scheme, params)| (scheme, params.trim_start()))
        .ok_or_else(|| {
            TaglistError::challenge(format!(
                "header {:?} has no parameters after the scheme",
                header
            ))
        })
}

/// Parameters of a bearer-token challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthChallenge {
    /// The authentication scheme, normally "Bearer"
    pub scheme: String,
    /// URL of the token service
    pub realm: String,
    /// Audience the token is issued for
    pub service: String,
    /// Requested permission, e.g. `repository:library/alpine:pull`
    pub scope: String,
}

impl AuthChallenge {
    /// Parses a `Www-Authenticate` header value.
    ///
    /// `realm`, `service` and `scope` are all required.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtaglist::auth::AuthChallenge;
    ///
    /// let header = r#"Bearer realm="https://auth.example/token",service="registry.example",scope="repository:x:pull""#;
    /// let challenge = AuthChallenge::parse(header).unwrap();
    /// assert_eq!(challenge.service, "registry.example");
    /// ```
    pub fn parse(header: &str) -> Result<Self> {
        let (scheme, _) = split_scheme(header)?;
        let params = parse_params(header)?;

        let lookup = |name: &str| {
            params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| {
                    TaglistError::challenge(format!("missing required parameter '{}'", name))
                })
        };

        Ok(Self {
            scheme: scheme.to_string(),
            realm: lookup("realm")?,
            service: lookup("service")?,
            scope: lookup("scope")?,
        })
    }

    /// Extracts the challenge from a 401 response's headers.
    pub fn from_headers(headers: &Headers) -> Result<Self> {
        let header = headers.get(WWW_AUTHENTICATE).ok_or_else(|| {
            TaglistError::challenge("401 response carries no Www-Authenticate header")
        })?;
        Self::parse(header)
    }

    /// Builds the unauthenticated token request `<realm>?service=..&scope=..`.
    pub fn token_request(&self) -> HttpRequest {
        HttpRequest::get(self.realm.as_str())
            .with_data("service", self.service.as_str())
            .with_data("scope", self.scope.as_str())
    }
}

/// Reply from a token service.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

impl TokenResponse {
    /// Decodes a token service response.
    ///
    /// The response must be JSON with a string `token` field.
    pub fn from_response(response: &HttpResponse) -> Result<Self> {
        serde_json::from_str(response.body()).map_err(|e| {
            TaglistError::token_with_source(
                format!(
                    "token service replied with status {} and no usable token",
                    response.status()
                ),
                e,
            )
        })
    }

    /// The `Authorization` header value for this token.
    pub fn to_header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

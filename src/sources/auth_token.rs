use std::fmt;

use http::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::StatusCode;
use reqwest::Url;
use serde::{Deserialize, Deserializer};

use crate::config::inputs::ActionInputs;
use crate::helpers::time::parse_expires_at;
use crate::sources::error::FetchError;
use crate::utils::constants::{AUTH_TOKEN_PATH, REPOSITORY_QUERY_PARAM};

/// Successful body of `GET /sfp/api/repository/auth-token`.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub expires_at: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_empty")]
    pub token_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub provider: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scope: String,
}

// metadata fields may be sent as explicit nulls
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Debug for AuthTokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokenResponse")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .field("token_type", &self.token_type)
            .field("provider", &self.provider)
            .field("scope", &self.scope)
            .finish()
    }
}

impl AuthTokenResponse {
    /// The token, if the server sent a non-empty one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn expires_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_expires_at(&self.expires_at)
    }
}

/// Best-effort body of a failed request.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: Option<String>,
    pub status_code: Option<u16>,
}

/// One attempt's request: target URL plus bearer credential.
#[derive(Clone)]
pub struct TokenRequest {
    url: Url,
    server_token: String,
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

impl TokenRequest {
    /// `{server_url}/sfp/api/repository/auth-token?repositoryIdentifier={repository}`,
    /// repository form-encoded (`owner/repo` -> `owner%2Frepo`).
    pub fn new(inputs: &ActionInputs) -> Result<Self, FetchError> {
        let base = inputs.server_url.trim_end_matches('/');
        let invalid = |reason: String| FetchError::InvalidServerUrl {
            url: inputs.server_url.clone(),
            reason,
        };

        let mut url = Url::parse(&format!("{base}{AUTH_TOKEN_PATH}"))
            .map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        url.query_pairs_mut()
            .append_pair(REPOSITORY_QUERY_PARAM, &inputs.repository);

        Ok(Self {
            url,
            server_token: inputs.server_token.clone(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> Result<HeaderMap, FetchError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", self.server_token))
            .map_err(|err| FetchError::InvalidCredential { reason: err.to_string() })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

/// Parse a 2xx body. A body without a usable `token` is an error.
pub fn parse_token_response(body: &str) -> Result<AuthTokenResponse, FetchError> {
    let response: AuthTokenResponse =
        serde_json::from_str(body).map_err(|err| FetchError::InvalidBody(err.to_string()))?;
    if response.token().is_none() {
        return Err(FetchError::MissingToken);
    }
    Ok(response)
}

/// Failure text for a non-2xx response: JSON `message`, then raw text,
/// then `HTTP {status}: {reason}`.
pub fn http_error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|err| err.message)
        .filter(|m| !m.is_empty());
    if let Some(message) = from_json {
        return message;
    }

    if !body.trim().is_empty() {
        return body.to_owned();
    }

    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    )
}

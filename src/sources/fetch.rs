//! Token source
//!
//! One attempt against the SFP server: send the request, classify the
//! response, parse the token body.

use reqwest::Client;
use tracing::debug;

use crate::config::settings::HttpConfig;
use crate::sources::auth_token::{http_error_message, parse_token_response, AuthTokenResponse, TokenRequest};
use crate::sources::error::FetchError;
use crate::utils::constants::{ACTION_NAME, VERSION};

pub trait FetchToken {
    fn fetch_token(
        &self,
        request: &TokenRequest,
    ) -> impl std::future::Future<Output = Result<AuthTokenResponse, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct SfpServerSource {
    client: Client,
}

impl SfpServerSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("{ACTION_NAME}/{VERSION}"))
            .build()?;
        Ok(Self::new(client))
    }
}

impl FetchToken for SfpServerSource {
    async fn fetch_token(&self, request: &TokenRequest) -> Result<AuthTokenResponse, FetchError> {
        let response = self
            .client
            .get(request.url().clone())
            .headers(request.headers()?)
            .send()
            .await?;

        let status = response.status();
        debug!("sfp server responded with {} for {}", status, request.url().path());
        if !status.is_success() {
            // an unreadable error body still yields the status line
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                message: http_error_message(status, &body),
            });
        }

        let body = response.text().await?;
        parse_token_response(&body)
    }
}

use tracing::info;

use crate::config::inputs::{ActionInputs, RawInputs};
use crate::fetcher::header::print_header;
use crate::helpers::time::{now_utc, seconds_until};
use crate::host::ActionHost;
use crate::resilience::retry::{RetryPolicy, Sleeper};
use crate::sources::auth_token::{AuthTokenResponse, TokenRequest};
use crate::sources::error::FetchError;
use crate::sources::fetch::FetchToken;
use crate::utils::constants::OUTPUT_TOKEN;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Resolves inputs, fetches a token with retries and publishes it through
/// the host. Every failure ends up in a single `set_failed` report.
pub struct TokenFetcher<H, F, S> {
    host: H,
    source: F,
    sleeper: S,
    policy: RetryPolicy,
}

impl<H, F, S> TokenFetcher<H, F, S>
where
    H: ActionHost,
    F: FetchToken,
    S: Sleeper,
{
    pub fn new(host: H, source: F, sleeper: S) -> Self {
        Self {
            host,
            source,
            sleeper,
            policy: RetryPolicy::fixed(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    pub async fn run(&self, inputs: &RawInputs) {
        if let Err(err) = self.try_run(inputs).await {
            self.host.set_failed(&err.to_string());
        }
    }

    async fn try_run(&self, raw: &RawInputs) -> Result<(), FetchError> {
        let inputs = raw.resolve()?;
        print_header(&self.host, &inputs);

        let (attempt, response) = self.fetch_with_retry(&inputs).await?;
        self.publish(attempt, &response)
    }

    async fn fetch_with_retry(
        &self,
        inputs: &ActionInputs,
    ) -> Result<(u32, AuthTokenResponse), FetchError> {
        let host = &self.host;
        let source = &self.source;
        let attempts = self.policy.attempts;

        self.policy
            .run_with_retry(
                &self.sleeper,
                |attempt| async move {
                    host.info(&format!("Attempt {attempt} of {attempts}..."));
                    let request = TokenRequest::new(inputs)?;
                    host.debug(&format!("Fetching token from: {}", request.url()));
                    let response = source.fetch_token(&request).await?;
                    Ok::<_, FetchError>((attempt, response))
                },
                |attempt, err, next_delay| {
                    host.warning(&format!("Attempt {attempt} failed: {err}"));
                    if let Some(delay) = next_delay {
                        host.info(&format!("Retrying in {} seconds...", delay.as_secs()));
                    }
                },
            )
            .await
            .map_err(|exhausted| FetchError::Exhausted {
                attempts: exhausted.attempts,
                last: exhausted
                    .last
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_owned()),
            })
    }

    fn publish(&self, attempt: u32, response: &AuthTokenResponse) -> Result<(), FetchError> {
        let token = response.token().ok_or(FetchError::MissingToken)?;

        // mask before the value can show up in any output command
        self.host.set_secret(token);
        self.host
            .set_output(OUTPUT_TOKEN, token)
            .map_err(|err| FetchError::Output {
                name: OUTPUT_TOKEN.to_owned(),
                reason: err.to_string(),
            })?;

        self.host.info(&format!("Successfully retrieved GitHub token on attempt {attempt}"));
        self.host.info(&format!("Token expires at: {}", response.expires_at));
        self.host.info(&format!("Token type: {}", response.token_type));
        self.host.info(&format!("Provider: {}", response.provider));

        if let Some(expires_at) = response.expires_at_utc() {
            self.host.debug(&format!(
                "Token valid for {} more seconds",
                seconds_until(expires_at, now_utc())
            ));
        }
        info!("token for scope '{}' published", response.scope);
        Ok(())
    }
}

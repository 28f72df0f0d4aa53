use crate::sources::error::FetchError;
use crate::utils::constants::{INPUT_SERVER_TOKEN, INPUT_SERVER_URL};

/// Inputs as handed over by the runner or the command line, before validation.
///
/// `github_repository` is the environment fallback for `repository`; it is
/// passed in explicitly so resolution never reads the process environment.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub server_url: Option<String>,
    pub server_token: Option<String>,
    pub repository: Option<String>,
    pub github_repository: Option<String>,
}

/// Validated request parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct ActionInputs {
    pub server_url: String,
    pub server_token: String,
    pub repository: String,
}

impl std::fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionInputs")
            .field("server_url", &self.server_url)
            .field("server_token", &"<redacted>")
            .field("repository", &self.repository)
            .finish()
    }
}

impl RawInputs {
    /// Required inputs first, then repository: explicit input, then the
    /// `GITHUB_REPOSITORY` fallback.
    pub fn resolve(&self) -> Result<ActionInputs, FetchError> {
        let server_url = non_empty(&self.server_url)
            .ok_or(FetchError::MissingInput(INPUT_SERVER_URL))?;
        let server_token = non_empty(&self.server_token)
            .ok_or(FetchError::MissingInput(INPUT_SERVER_TOKEN))?;
        let repository = non_empty(&self.repository)
            .or_else(|| non_empty(&self.github_repository))
            .ok_or(FetchError::MissingRepository)?;

        Ok(ActionInputs {
            server_url,
            server_token,
            repository,
        })
    }
}

// runner inputs are trimmed, whitespace-only counts as not supplied
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

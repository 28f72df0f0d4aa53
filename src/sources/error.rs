use thiserror::Error;

/// Everything that can go wrong while fetching a token.
///
/// Only `MissingInput`, `MissingRepository`, `Output` and `Exhausted` end a
/// run; the rest are attempt errors and go through the retry loop.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Repository not specified and GITHUB_REPOSITORY not set")]
    MissingRepository,

    #[error("Invalid SFP server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("Invalid sfp-server-token: {reason}")]
    InvalidCredential { reason: String },

    #[error("{0}")]
    Transport(String),

    #[error("Failed to get token: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid token response: {0}")]
    InvalidBody(String),

    #[error("Response did not contain a token")]
    MissingToken,

    #[error("Failed to set output '{name}': {reason}")]
    Output { name: String, reason: String },

    #[error("Failed to get GitHub token after {attempts} attempts. Last error: {last}")]
    Exhausted { attempts: u32, last: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest keeps the useful part (dns, refused, timeout) in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        FetchError::Transport(message)
    }
}

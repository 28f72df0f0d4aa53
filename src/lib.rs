//! # get-github-token
//!
//! Fetches a short-lived GitHub token for a repository from an SFP server,
//! retrying transient failures a fixed number of times, and hands it to
//! the hosting environment as a masked output.
//!
//! Modules:
//! - `config` — raw and resolved inputs, runtime settings
//! - `sources` — request/response types and the HTTP token source
//! - `resilience` — fixed retry policy and the sleeper seam
//! - `host` — GitHub Actions and console hosts, secret masking
//! - `fetcher` — the token fetch procedure

pub mod config;
pub mod fetcher;
pub mod helpers;
pub mod host;
pub mod resilience;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::config::inputs::{ActionInputs, RawInputs};
pub use crate::fetcher::TokenFetcher;
pub use crate::sources::error::FetchError;

pub mod auth_token;
pub mod error;
pub mod fetch;

pub use auth_token::{AuthTokenResponse, TokenRequest};
pub use error::FetchError;
pub use fetch::{FetchToken, SfpServerSource};

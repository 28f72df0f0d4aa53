//! Shared constants and invariants

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const ACTION_NAME: &str = "get-github-token";

// Retry policy, fixed
pub const MAX_ATTEMPTS: u32 = 3;
pub const RETRY_DELAY_MS: u64 = 5000;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const AUTH_TOKEN_PATH: &str = "/sfp/api/repository/auth-token";
pub const REPOSITORY_QUERY_PARAM: &str = "repositoryIdentifier";

// Action inputs / outputs
pub const INPUT_SERVER_URL: &str = "sfp-server-url";
pub const INPUT_SERVER_TOKEN: &str = "sfp-server-token";
pub const OUTPUT_TOKEN: &str = "token";

pub const MASK: &str = "***";

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use get_github_token::config::inputs::RawInputs;
use get_github_token::config::settings::{HttpConfig, LogFormat, Settings};
use get_github_token::fetcher::TokenFetcher;
use get_github_token::host::{ActionHost, ConsoleHost, GithubActionsHost};
use get_github_token::resilience::retry::TokioSleeper;
use get_github_token::sources::fetch::SfpServerSource;
use get_github_token::utils::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use get_github_token::utils::logging::{self, LogLevel};
use tracing::{debug, info};

/// Inputs come from flags or from the runner's `INPUT_*` variables.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long = "sfp-server-url", env = "INPUT_SFP-SERVER-URL")]
    server_url: Option<String>,
    #[arg(long = "sfp-server-token", env = "INPUT_SFP-SERVER-TOKEN", hide_env_values = true)]
    server_token: Option<String>,
    #[arg(long, env = "INPUT_REPOSITORY")]
    repository: Option<String>,
    #[arg(long, env = "GITHUB_REPOSITORY")]
    github_repository: Option<String>,
    /// set by the runner; switches the host to workflow commands
    #[arg(long, env = "GITHUB_ACTIONS")]
    github_actions: bool,
    #[arg(long, env = "GITHUB_OUTPUT")]
    github_output: Option<PathBuf>,
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    http_timeout_secs: u64,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[arg(long, env = "LOG_FORMAT", value_enum)]
    log_format: Option<LogFormat>,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            http: HttpConfig { timeout_secs: self.http_timeout_secs },
            logging: logging::logging_config(self.log_level, self.log_format),
        }
    }

    fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            server_url: self.server_url.clone(),
            server_token: self.server_token.clone(),
            repository: self.repository.clone(),
            github_repository: self.github_repository.clone(),
        }
    }

    fn host(&self) -> Box<dyn ActionHost> {
        if self.github_actions {
            Box::new(GithubActionsHost::stdout(self.github_output.clone()))
        } else {
            Box::new(ConsoleHost::stdout())
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // -------------------------------
    // 1. Read args and env
    // -------------------------------

    let args = Args::parse();
    let settings = args.settings();
    logging::init_logging(&settings.logging);

    // -------------------------------
    // 2. Create request client
    // -------------------------------

    let source = SfpServerSource::from_config(&settings.http)?;
    debug!("http timeout {:?}", settings.http.timeout());

    // -------------------------------
    // 3. Fetch token and report through the host
    // -------------------------------

    let fetcher = TokenFetcher::new(args.host(), source, TokioSleeper);
    fetcher.run(&args.raw_inputs()).await;

    if fetcher.host().has_failed() {
        return Ok(ExitCode::FAILURE);
    }
    info!("token fetched");
    Ok(ExitCode::SUCCESS)
}

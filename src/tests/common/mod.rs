// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::collections::VecDeque;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::config::inputs::RawInputs;
use crate::host::{ActionHost, Redactor};
use crate::resilience::retry::Sleeper;
use crate::sources::auth_token::{AuthTokenResponse, TokenRequest};
use crate::sources::error::FetchError;
use crate::sources::fetch::FetchToken;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Address nothing listens on.
pub async fn closed_port_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn raw_inputs(server_url: &str) -> RawInputs {
    RawInputs {
        server_url: Some(server_url.to_owned()),
        server_token: Some("test-token-123".to_owned()),
        repository: Some("owner/repo".to_owned()),
        github_repository: None,
    }
}

pub fn token_response(token: &str) -> AuthTokenResponse {
    AuthTokenResponse {
        token: Some(token.to_owned()),
        expires_at: "2025-11-18T12:00:00Z".to_owned(),
        token_type: "installation".to_owned(),
        provider: "github".to_owned(),
        scope: "owner/repo".to_owned(),
    }
}

pub fn token_body(token: &str) -> serde_json::Value {
    json!({
        "token": token,
        "expiresAt": "2025-11-18T12:00:00Z",
        "type": "installation",
        "provider": "github",
        "scope": "owner/repo",
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Info(String),
    Warning(String),
    Debug(String),
    Output(String, String),
    Secret(String),
    Failed(String),
}

/// Test double recording everything a run reports.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
    redactor: Redactor,
    failed: AtomicBool,
    fail_outputs: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose output channel is broken.
    pub fn failing_outputs() -> Self {
        Self { fail_outputs: true, ..Self::default() }
    }

    fn push(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e { HostEvent::Info(m) => Some(m), _ => None })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e { HostEvent::Warning(m) => Some(m), _ => None })
            .collect()
    }

    pub fn debugs(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e { HostEvent::Debug(m) => Some(m), _ => None })
            .collect()
    }

    pub fn outputs(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e { HostEvent::Output(k, v) => Some((k, v)), _ => None })
            .collect()
    }

    pub fn secrets(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e { HostEvent::Secret(s) => Some(s), _ => None })
            .collect()
    }

    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e { HostEvent::Failed(m) => Some(m), _ => None })
            .collect()
    }
}

impl ActionHost for RecordingHost {
    fn info(&self, message: &str) {
        self.push(HostEvent::Info(self.redactor.mask(message)));
    }

    fn warning(&self, message: &str) {
        self.push(HostEvent::Warning(self.redactor.mask(message)));
    }

    fn debug(&self, message: &str) {
        self.push(HostEvent::Debug(self.redactor.mask(message)));
    }

    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        if self.fail_outputs {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only output file"));
        }
        self.push(HostEvent::Output(name.to_owned(), value.to_owned()));
        Ok(())
    }

    fn set_secret(&self, value: &str) {
        self.redactor.register(value);
        self.push(HostEvent::Secret(value.to_owned()));
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.push(HostEvent::Failed(self.redactor.mask(message)));
    }

    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

/// Sleeper that returns at once and remembers what it was asked for.
#[derive(Debug, Default)]
pub struct InstantSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl InstantSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

/// Source replaying scripted attempt results, one per call.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<AuthTokenResponse, FetchError>>>,
    requests: Mutex<Vec<TokenRequest>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<AuthTokenResponse, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every call answers with the same result.
    pub fn always(result: Result<AuthTokenResponse, FetchError>, times: usize) -> Self {
        Self::new(vec![result; times])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<TokenRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl FetchToken for ScriptedSource {
    async fn fetch_token(&self, request: &TokenRequest) -> Result<AuthTokenResponse, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".to_owned())))
    }
}

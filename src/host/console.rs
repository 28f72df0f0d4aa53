use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{debug, error, info, warn};

use crate::host::{ActionHost, Redactor};

/// Host for plain shells: records go to the tracing subscriber (stderr),
/// outputs are printed as `name=value` lines on stdout.
#[derive(Debug)]
pub struct ConsoleHost<W: Write> {
    out: Mutex<W>,
    redactor: Redactor,
    failed: AtomicBool,
}

impl ConsoleHost<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            redactor: Redactor::new(),
            failed: AtomicBool::new(false),
        }
    }

    pub fn into_writer(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write> ActionHost for ConsoleHost<W> {
    fn info(&self, message: &str) {
        info!("{}", self.redactor.mask(message));
    }

    fn warning(&self, message: &str) {
        warn!("{}", self.redactor.mask(message));
    }

    fn debug(&self, message: &str) {
        debug!("{}", self.redactor.mask(message));
    }

    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{name}={value}")?;
        out.flush()
    }

    fn set_secret(&self, value: &str) {
        self.redactor.register(value);
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        error!("{}", self.redactor.mask(message));
    }

    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::debug;
use uuid::Uuid;

use crate::host::{ActionHost, Redactor};

/// Host for a GitHub Actions step: workflow commands on stdout, outputs
/// appended to the `$GITHUB_OUTPUT` file.
#[derive(Debug)]
pub struct GithubActionsHost<W: Write> {
    writer: Mutex<W>,
    output_file: Option<PathBuf>,
    redactor: Redactor,
    failed: AtomicBool,
}

impl GithubActionsHost<io::Stdout> {
    pub fn stdout(output_file: Option<PathBuf>) -> Self {
        Self::new(io::stdout(), output_file)
    }
}

impl<W: Write> GithubActionsHost<W> {
    pub fn new(writer: W, output_file: Option<PathBuf>) -> Self {
        Self {
            writer: Mutex::new(writer),
            output_file,
            redactor: Redactor::new(),
            failed: AtomicBool::new(false),
        }
    }

    pub fn into_writer(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(writer, "{line}");
        let _ = writer.flush();
    }

    fn command(&self, name: &str, message: &str) {
        let data = escape_data(&self.redactor.mask(message));
        self.write_line(&format!("::{name}::{data}"));
    }
}

impl<W: Write> ActionHost for GithubActionsHost<W> {
    fn info(&self, message: &str) {
        self.write_line(&self.redactor.mask(message));
    }

    fn warning(&self, message: &str) {
        self.command("warning", message);
    }

    fn debug(&self, message: &str) {
        self.command("debug", message);
    }

    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        let Some(path) = &self.output_file else {
            // runners without $GITHUB_OUTPUT still understand the legacy command
            self.write_line("");
            self.write_line(&format!(
                "::set-output name={}::{}",
                escape_property(name),
                escape_data(value)
            ));
            return Ok(());
        };

        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        if name.contains(&delimiter) || value.contains(&delimiter) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("output '{name}' contains the heredoc delimiter"),
            ));
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        write!(file, "{name}<<{delimiter}\n{value}\n{delimiter}\n")?;
        debug!("output '{}' written to {}", name, path.display());
        Ok(())
    }

    fn set_secret(&self, value: &str) {
        if value.is_empty() {
            return;
        }
        self.write_line(&format!("::add-mask::{}", escape_data(value)));
        self.redactor.register(value);
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.command("error", message);
    }

    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

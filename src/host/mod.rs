//! Channel between a run and the environment that hosts it: leveled log
//! records, named outputs, secret masking and the terminal failure report.

pub mod console;
pub mod github;
pub mod redact;

use std::io;

pub use console::ConsoleHost;
pub use github::GithubActionsHost;
pub use redact::Redactor;

pub trait ActionHost {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn debug(&self, message: &str);

    /// Publish a named output of the run.
    fn set_output(&self, name: &str, value: &str) -> io::Result<()>;

    /// Mask `value` in everything emitted from now on.
    fn set_secret(&self, value: &str);

    /// Terminal failure report; marks the run as failed.
    fn set_failed(&self, message: &str);

    fn has_failed(&self) -> bool;
}

impl<H: ActionHost + ?Sized> ActionHost for Box<H> {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn warning(&self, message: &str) {
        (**self).warning(message)
    }

    fn debug(&self, message: &str) {
        (**self).debug(message)
    }

    fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        (**self).set_output(name, value)
    }

    fn set_secret(&self, value: &str) {
        (**self).set_secret(value)
    }

    fn set_failed(&self, message: &str) {
        (**self).set_failed(message)
    }

    fn has_failed(&self) -> bool {
        (**self).has_failed()
    }
}

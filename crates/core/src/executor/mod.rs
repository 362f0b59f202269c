//! Execution of assembled command lines

pub mod shell;

pub use shell::{DEFAULT_SHELL, ShellExecutor};

use crate::error::Result;

/// Runs one assembled command line to completion.
///
/// Implementations capture the process output and map failures onto
/// [`crate::Error::OutputData`] and [`crate::Error::Generic`]. The same
/// executor is shared across threads by concurrent invocations.
pub trait Executor: Send + Sync + 'static {
    /// Execute `line` and return its output without trailing newlines
    fn execute(&self, line: &str) -> Result<String>;
}

impl<F> Executor for F
where
    F: Fn(&str) -> Result<String> + Send + Sync + 'static,
{
    fn execute(&self, line: &str) -> Result<String> {
        self(line)
    }
}

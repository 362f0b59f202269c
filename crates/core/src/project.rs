//! Execution context for running commands against one Swift package

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot;

use crate::{
    command::{Command, Flag, assemble},
    config::ProjectConfig,
    error::{Error, Result},
    executor::{Executor, ShellExecutor},
};

/// A Swift package location plus the executor that runs commands for it.
///
/// When a path is set every command changes into it first, and
/// `package init` creates it recursively. The project is immutable after
/// construction and can be shared freely between threads and tasks; each
/// invocation spawns its own process.
#[derive(Debug)]
pub struct Project<E = ShellExecutor> {
    path: Option<String>,
    executor: Arc<E>,
}

impl<E> Clone for Project<E> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            executor: Arc::clone(&self.executor),
        }
    }
}

impl Default for Project<ShellExecutor> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Project<ShellExecutor> {
    /// Create a project using `/bin/sh` and no extra environment
    pub fn new(path: Option<String>) -> Self {
        Self::with_executor(path, ShellExecutor::default())
    }

    /// Create a project rooted at `path`
    pub fn at(path: impl Into<String>) -> Self {
        Self::new(Some(path.into()))
    }

    pub fn from_config(config: &ProjectConfig) -> Self {
        let executor = match &config.shell {
            Some(shell) => ShellExecutor::new(shell.clone()),
            None => ShellExecutor::default(),
        }
        .with_envs(config.env.clone());
        Self::with_executor(config.path.clone(), executor)
    }

    pub fn with_shell(self, shell: impl Into<String>) -> Self {
        let executor = ShellExecutor::new(shell).with_envs(self.executor.env().clone());
        Self::with_executor(self.path, executor)
    }

    pub fn with_env(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let executor = (*self.executor).clone().with_env(key, value);
        Self::with_executor(self.path, executor)
    }

    pub fn with_envs<K, V>(self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let executor = (*self.executor).clone().with_envs(vars);
        Self::with_executor(self.path, executor)
    }

    pub fn shell(&self) -> &str {
        self.executor.shell()
    }

    pub fn env(&self) -> &HashMap<String, String> {
        self.executor.env()
    }
}

impl<E: Executor> Project<E> {
    pub fn with_executor(path: Option<String>, executor: E) -> Self {
        Self {
            path,
            executor: Arc::new(executor),
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The shell line `run` would execute for `command` and `flags`
    pub fn command_line(&self, command: &Command, flags: &[Flag]) -> String {
        assemble(self.path(), command, flags)
    }

    /// Run a command and block until it finishes.
    ///
    /// Returns the output without trailing newlines. Failures from the
    /// executor are returned unchanged: [`Error::OutputData`] when the command
    /// succeeded without output, [`Error::Generic`] with the exit code and
    /// message otherwise.
    pub fn run(&self, command: &Command, flags: &[Flag]) -> Result<String> {
        let line = self.command_line(command, flags);
        tracing::debug!("Running: {}", line);
        self.executor.execute(&line)
    }

    /// Run a command on a worker and report through `completion`.
    ///
    /// The line is assembled before this returns. Inside a Tokio runtime the
    /// command runs on the runtime's blocking pool, otherwise on a dedicated
    /// thread. `completion` is called exactly once with the output or the
    /// error, also when the executor panics. Calls are not ordered with
    /// respect to each other and cannot be cancelled.
    pub fn run_with<F>(&self, command: &Command, flags: &[Flag], completion: F)
    where
        F: FnOnce(Result<String>) + Send + 'static,
    {
        let line = self.command_line(command, flags);
        tracing::debug!("Scheduling: {}", line);

        let executor = Arc::clone(&self.executor);
        let job = move || {
            let result = std::panic::catch_unwind(AssertUnwindSafe(|| executor.execute(&line)))
                .unwrap_or_else(|payload| Err(Error::ExecutorPanicked(panic_message(&*payload))));
            completion(result);
        };

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(job);
            }
            Err(_) => {
                tracing::trace!("No Tokio runtime, running on a worker thread");
                std::thread::spawn(job);
            }
        }
    }

    /// Run a command on the blocking worker pool and await its result
    pub async fn run_async(&self, command: &Command, flags: &[Flag]) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        self.run_with(command, flags, move |result| {
            if tx.send(result).is_err() {
                tracing::debug!("Result receiver dropped before completion");
            }
        });

        rx.await.unwrap_or_else(|_| {
            Err(Error::ExecutorPanicked(
                "completion was dropped without a result".to_string(),
            ))
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

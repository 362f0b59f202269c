use std::collections::HashMap;
use std::process::{Command, Output};

use super::Executor;
use crate::error::{Error, Result};

/// Shell used when none is configured
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Executes lines with `<shell> -c <line>`
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
    env: HashMap<String, String>,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            env: HashMap::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_envs<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    fn interpret(output: Output) -> Result<String> {
        let stdout = trim_trailing_newlines(&String::from_utf8_lossy(&output.stdout));

        if !output.status.success() {
            let stderr = trim_trailing_newlines(&String::from_utf8_lossy(&output.stderr));
            // Killed by a signal
            let code = output.status.code().unwrap_or(-1);
            let message = if stderr.is_empty() { stdout } else { stderr };
            return Err(Error::Generic { code, message });
        }

        if stdout.is_empty() {
            return Err(Error::OutputData);
        }

        Ok(stdout)
    }
}

impl Executor for ShellExecutor {
    fn execute(&self, line: &str) -> Result<String> {
        tracing::debug!("Executing with {}: {}", self.shell, line);

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(line);
        for (key, value) in &self.env {
            tracing::trace!("Setting env: {}={}", key, value);
            cmd.env(key, value);
        }

        let output = cmd.output()?;
        let result = Self::interpret(output);
        if let Err(ref e) = result {
            tracing::warn!("Command `{}` failed: {}", line, e);
        }
        result
    }
}

fn trim_trailing_newlines(text: &str) -> String {
    text.trim_end_matches(['\n', '\r']).to_string()
}

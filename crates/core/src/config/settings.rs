use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Names searched for when discovering a configuration file
pub const CONFIG_FILE_NAMES: [&str; 2] = [".buildkit.json", "buildkit.json"];

/// Execution context settings for a [`crate::Project`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProjectConfig {
    /// Working directory of the package
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Shell program used to run command lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    /// Extra environment variables for the shell
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

impl ProjectConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values that parse but cannot be used to run a command
    pub fn validate(&self) -> Result<()> {
        if matches!(self.shell.as_deref(), Some(shell) if shell.trim().is_empty()) {
            return Err(Error::ConfigError("shell must not be empty".to_string()));
        }
        if matches!(self.path.as_deref(), Some(path) if path.trim().is_empty()) {
            return Err(Error::ConfigError("path must not be empty".to_string()));
        }
        if let Some(key) = self.env.keys().find(|key| key.is_empty() || key.contains('=')) {
            return Err(Error::ConfigError(format!(
                "invalid environment variable name '{key}'"
            )));
        }
        Ok(())
    }

    /// Walk up from `start_path` looking for a configuration file
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Overlay `other` on top of this config; values set in `other` win
    pub fn merge(mut self, other: ProjectConfig) -> Self {
        if other.path.is_some() {
            self.path = other.path;
        }
        if other.shell.is_some() {
            self.shell = other.shell;
        }
        self.env.extend(other.env);
        self
    }
}

//! Resolution of the effective project configuration

use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tracing::debug;

use buildkit_core::ProjectConfig;

use crate::cli::GlobalArgs;

/// Load the configuration file (explicit or discovered) and overlay the CLI arguments
pub fn resolve_config(global: &GlobalArgs) -> Result<ProjectConfig> {
    let file_config = match &global.config {
        Some(path) => load(path)?,
        None => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            match ProjectConfig::find_config_file(&cwd) {
                Some(path) => load(&path)?,
                None => {
                    debug!("No configuration file found from {:?}", cwd);
                    ProjectConfig::default()
                }
            }
        }
    };

    Ok(file_config.merge(cli_overrides(global)))
}

/// Configuration expressed directly by the command line arguments
pub fn cli_overrides(global: &GlobalArgs) -> ProjectConfig {
    ProjectConfig {
        path: global.path.clone(),
        shell: global.shell.clone(),
        env: global.env.iter().cloned().collect(),
    }
}

fn load(path: &Path) -> Result<ProjectConfig> {
    debug!("Using configuration file {:?}", path);
    ProjectConfig::load_from_file(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_arguments_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.json");
        std::fs::write(
            &config_path,
            r#"{ "path": "./from-file", "shell": "/bin/bash", "env": { "A": "file", "B": "file" } }"#,
        )
        .unwrap();

        let global = GlobalArgs {
            path: Some("./from-cli".to_string()),
            env: vec![("B".to_string(), "cli".to_string())],
            config: Some(config_path),
            ..Default::default()
        };

        let config = resolve_config(&global).unwrap();
        assert_eq!(config.path.as_deref(), Some("./from-cli"));
        assert_eq!(config.shell.as_deref(), Some("/bin/bash"));
        assert_eq!(config.env["A"], "file");
        assert_eq!(config.env["B"], "cli");
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let global = GlobalArgs {
            config: Some("/nonexistent/buildkit.json".into()),
            ..Default::default()
        };
        assert!(resolve_config(&global).is_err());
    }
}

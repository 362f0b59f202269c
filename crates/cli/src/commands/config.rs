use anyhow::{Context, Result};
use std::env;
use tracing::info;

use crate::cli::GlobalArgs;
use crate::config::resolve_config;

/// Write the effective configuration to `.buildkit.json` in the current directory
pub fn config_command(global: &GlobalArgs, force: bool) -> Result<()> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let config_path = cwd.join(buildkit_core::config::CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    let config = resolve_config(global)?;
    config
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    info!("Wrote configuration: {:?}", config);
    println!("✅ Created config: {}", config_path.display());
    Ok(())
}

use anyhow::{Context, Result};
use tracing::{debug, info};

use buildkit_core::{Command, CommandLine, Error, Flag, Project};

use crate::cli::GlobalArgs;
use crate::config::resolve_config;
use crate::display::print_command_breakdown;

pub fn run_command(global: &GlobalArgs, command: Command, flags: Vec<Flag>) -> Result<()> {
    let config = resolve_config(global)?;

    let mut line = CommandLine::new(command).with_flags(flags);
    line.working_dir = config.path.clone();

    if global.dry_run {
        if global.json {
            let json = serde_json::json!({
                "line": line.to_shell_command(),
                "shell": config.shell.as_deref().unwrap_or(buildkit_core::executor::DEFAULT_SHELL),
                "env": config.env,
                "command": line,
            });
            let rendered =
                serde_json::to_string_pretty(&json).context("Failed to render dry run")?;
            println!("{rendered}");
        } else {
            println!("{line}");
            print_command_breakdown(&line, &config.env);
        }
        return Ok(());
    }

    let project = Project::from_config(&config);
    info!("Running: {}", line);

    match project.run(&line.command, &line.flags) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(Error::OutputData) => {
            debug!("Command finished without output");
            Ok(())
        }
        Err(Error::Generic { code, message }) => {
            if !message.is_empty() {
                eprintln!("{message}");
            }
            std::process::exit(failure_exit_code(code));
        }
        Err(e) => Err(e).with_context(|| format!("Failed to execute: {line}")),
    }
}

/// Exit status for a failed command; zero and signal codes (-1) become 1
fn failure_exit_code(code: i32) -> i32 {
    if code > 0 { code } else { 1 }
}

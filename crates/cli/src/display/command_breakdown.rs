use std::collections::HashMap;
use std::fmt::Write;

use buildkit_core::{Command, CommandLine, SWIFT_PROGRAM, Subcommand};

pub fn print_command_breakdown(line: &CommandLine, env: &HashMap<String, String>) {
    print!("{}", format_command_breakdown(line, env));
}

/// Human readable description of what a command line will do
pub fn format_command_breakdown(line: &CommandLine, env: &HashMap<String, String>) -> String {
    let mut out = String::new();

    writeln!(out, "   🔧 Command breakdown:").ok();
    writeln!(out, "      • command: {SWIFT_PROGRAM}").ok();

    match &line.command {
        Command::Package(subcommand) => {
            writeln!(out, "      • subcommand: package").ok();
            writeln!(out, "      • package subcommand: {}", subcommand_name(subcommand)).ok();
        }
        other => {
            writeln!(out, "      • subcommand: {other}").ok();
        }
    }

    if let Some(dir) = &line.working_dir {
        writeln!(out, "      • workingDir: {dir}").ok();
        if line.command.is_initialize() {
            writeln!(out, "      • createsDir: yes").ok();
        }
    }

    if !line.flags.is_empty() {
        let flags: Vec<String> = line.flags.iter().map(ToString::to_string).collect();
        writeln!(out, "      • flags: {flags:?}").ok();
    }

    if !env.is_empty() {
        let mut keys: Vec<_> = env.keys().collect();
        keys.sort();
        writeln!(out, "      • extraEnv:").ok();
        for key in keys {
            writeln!(out, "         - {}={}", key, env[key]).ok();
        }
    }

    writeln!(out, "   🚀 Final command: {line}").ok();
    out
}

fn subcommand_name(subcommand: &Subcommand) -> String {
    let encoded = subcommand.encode();
    match encoded.split_once(' ') {
        Some((name, _)) => name.to_string(),
        None => encoded,
    }
}

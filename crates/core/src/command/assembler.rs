use serde::{Deserialize, Serialize};
use std::fmt;

use super::{flag::Flag, swift_command::Command};

/// Program every assembled line invokes
pub const SWIFT_PROGRAM: &str = "swift";

/// A single `swift` invocation: command, ordered flags and optional working directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    pub command: Command,
    #[serde(default)]
    pub flags: Vec<Flag>,
}

impl CommandLine {
    pub fn new(command: Command) -> Self {
        Self {
            working_dir: None,
            command,
            flags: Vec::new(),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn with_flags(mut self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.flags.extend(flags);
        self
    }

    pub fn to_shell_command(&self) -> String {
        assemble(self.working_dir.as_deref(), &self.command, &self.flags)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_command())
    }
}

/// Assemble the shell line for `command` and `flags`.
///
/// With a working directory the line changes into it first; `package init`
/// additionally creates it (recursively) since a new package usually lives in
/// a directory that does not exist yet. Flags keep the caller's order.
pub fn assemble(path: Option<&str>, command: &Command, flags: &[Flag]) -> String {
    let mut cmd: Vec<String> = Vec::with_capacity(flags.len() + 8);

    if let Some(path) = path {
        if command.is_initialize() {
            cmd.extend(["mkdir", "-p", path, "&&"].map(String::from));
        }
        cmd.extend(["cd", path, "&&"].map(String::from));
    }

    cmd.push(SWIFT_PROGRAM.to_string());
    cmd.push(command.encode());
    cmd.extend(flags.iter().map(Flag::encode));

    cmd.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{BuildConfig, PackageType, Subcommand};

    #[test]
    fn test_init_creates_and_enters_directory() {
        let line = assemble(
            Some("./demo"),
            &Command::Package(Subcommand::Initialize(PackageType::Executable)),
            &[],
        );
        insta::assert_snapshot!(line, @"mkdir -p ./demo && cd ./demo && swift package init --type executable");
    }

    #[test]
    fn test_run_release_in_directory() {
        let line = assemble(
            Some("./demo"),
            &Command::Run,
            &[Flag::Config(BuildConfig::Release)],
        );
        insta::assert_snapshot!(line, @"cd ./demo && swift run -c release");
    }

    #[test]
    fn test_no_path_starts_with_program() {
        let line = assemble(None, &Command::Package(Subcommand::Clean), &[]);
        insta::assert_snapshot!(line, @"swift package clean");
    }

    #[test]
    fn test_only_init_triggers_mkdir() {
        let path = "./pkg";
        let others = [
            Command::Build,
            Command::Run,
            Command::Test,
            Command::Package(Subcommand::Update),
            Command::Package(Subcommand::Edit("dep".into())),
            Command::Package(Subcommand::Unedit("dep".into())),
            Command::Package(Subcommand::Reset),
        ];

        for command in &others {
            let line = assemble(Some(path), command, &[]);
            assert!(line.starts_with("cd ./pkg && "), "{line}");
            assert!(!line.contains("mkdir"), "{line}");
        }

        for package_type in [
            PackageType::Empty,
            PackageType::Library,
            PackageType::Executable,
            PackageType::SystemModule,
        ] {
            let command = Command::Package(Subcommand::Initialize(package_type));
            let line = assemble(Some(path), &command, &[]);
            assert!(line.starts_with("mkdir -p ./pkg && cd ./pkg && "), "{line}");
        }
    }

    #[test]
    fn test_without_path_never_changes_directory() {
        let commands = [
            Command::Build,
            Command::Test,
            Command::Package(Subcommand::Initialize(PackageType::Library)),
        ];
        for command in &commands {
            let line = assemble(None, command, &[Flag::Verbose]);
            assert!(line.starts_with("swift "), "{line}");
            assert!(!line.contains("cd "), "{line}");
            assert!(!line.contains("mkdir"), "{line}");
        }
    }

    #[test]
    fn test_flag_order_is_preserved() {
        let line = assemble(None, &Command::Test, &[Flag::Verbose, Flag::Parallel]);
        let verbose = line.find("-v").unwrap();
        let parallel = line.find("-parallel").unwrap();
        assert!(verbose < parallel);
        assert_eq!(line, "swift test -v -parallel");

        let reversed = assemble(None, &Command::Test, &[Flag::Parallel, Flag::Verbose]);
        assert_eq!(reversed, "swift test -parallel -v");
    }

    #[test]
    fn test_command_line_builder() {
        let line = CommandLine::new(Command::Build)
            .with_working_dir("/tmp/app")
            .with_flag(Flag::Config(BuildConfig::Release))
            .with_flags([Flag::Stdlib(true), Flag::Raw("--arch arm64".into())]);

        insta::assert_snapshot!(line.to_string(), @"cd /tmp/app && swift build -c release --static-swift-stdlib --arch arm64");
    }

    #[test]
    fn test_command_line_json() {
        let line = CommandLine::new(Command::Package(Subcommand::Resolve))
            .with_flag(Flag::SkipUpdate);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "command": { "package": "resolve" },
                "flags": ["skip_update"],
            })
        );
    }
}

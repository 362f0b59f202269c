use serde::{Deserialize, Serialize};
use std::fmt;

use super::package::Subcommand;

/// Top level `swift` commands
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Build,
    Run,
    Test,
    Package(Subcommand),
}

impl Command {
    pub fn encode(&self) -> String {
        match self {
            Command::Build => "build".to_string(),
            Command::Run => "run".to_string(),
            Command::Test => "test".to_string(),
            Command::Package(subcommand) => format!("package {subcommand}"),
        }
    }

    /// Whether this is `swift package init`, of any package type
    pub fn is_initialize(&self) -> bool {
        matches!(self, Command::Package(Subcommand::Initialize(_)))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<Subcommand> for Command {
    fn from(subcommand: Subcommand) -> Self {
        Command::Package(subcommand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::PackageType;

    #[test]
    fn test_top_level_commands() {
        assert_eq!(Command::Build.encode(), "build");
        assert_eq!(Command::Run.encode(), "run");
        assert_eq!(Command::Test.encode(), "test");
    }

    #[test]
    fn test_package_composes_subcommand() {
        assert_eq!(
            Command::Package(Subcommand::Clean).to_string(),
            "package clean"
        );
        assert_eq!(
            Command::from(Subcommand::Initialize(PackageType::Library)).to_string(),
            "package init --type library"
        );
        assert_eq!(
            Command::Package(Subcommand::Unedit("NIO".into())).to_string(),
            "package unedit NIO"
        );
    }

    #[test]
    fn test_is_initialize() {
        assert!(Command::Package(Subcommand::Initialize(PackageType::Empty)).is_initialize());
        assert!(Command::Package(Subcommand::Initialize(PackageType::SystemModule)).is_initialize());
        assert!(!Command::Package(Subcommand::Edit("pkg".into())).is_initialize());
        assert!(!Command::Package(Subcommand::Update).is_initialize());
        assert!(!Command::Build.is_initialize());
    }
}

//! `swift package` subcommands

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Package type for `swift package init --type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageType {
    #[default]
    Empty,
    Library,
    Executable,
    SystemModule,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Empty => "empty",
            PackageType::Library => "library",
            PackageType::Executable => "executable",
            PackageType::SystemModule => "system-module",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(PackageType::Empty),
            "library" => Ok(PackageType::Library),
            "executable" => Ok(PackageType::Executable),
            "system-module" => Ok(PackageType::SystemModule),
            other => Err(Error::InvalidValue(format!(
                "unknown package type '{other}' (expected empty, library, executable or system-module)"
            ))),
        }
    }
}

/// Subcommands of `swift package`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subcommand {
    /// Initialize a new package
    Initialize(PackageType),
    /// Update package dependencies
    Update,
    /// Generate an Xcode project
    GenerateXcodeProject,
    /// Delete build artifacts
    Clean,
    /// Completion tool for shell completions
    CompletionTool,
    /// Describe the current package
    Describe,
    /// Print parsed Package.swift as JSON
    DumpPackage,
    /// Put a package in editable mode
    Edit(String),
    /// Reset the complete cache/build directory
    Reset,
    /// Resolve package dependencies
    Resolve,
    /// Print the resolved dependency graph
    ShowDependencies,
    /// Manipulate tools version of the current package
    ToolsVersion,
    /// Remove a package from editable mode
    Unedit(String),
}

impl Subcommand {
    pub fn encode(&self) -> String {
        match self {
            Subcommand::Initialize(package_type) => format!("init --type {package_type}"),
            Subcommand::Update => "update".to_string(),
            Subcommand::GenerateXcodeProject => "generate-xcodeproj".to_string(),
            Subcommand::Clean => "clean".to_string(),
            Subcommand::CompletionTool => "completion-tool".to_string(),
            Subcommand::Describe => "describe".to_string(),
            Subcommand::DumpPackage => "dump-package".to_string(),
            Subcommand::Edit(name) => format!("edit {name}"),
            Subcommand::Reset => "reset".to_string(),
            Subcommand::Resolve => "resolve".to_string(),
            Subcommand::ShowDependencies => "show-dependencies".to_string(),
            Subcommand::ToolsVersion => "tools-version".to_string(),
            Subcommand::Unedit(name) => format!("unedit {name}"),
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

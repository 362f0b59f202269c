//! buildkit - typed Swift package manager commands
//!
//! This crate provides functionality to:
//! - Describe `swift build`, `run`, `test` and `package` invocations with typed commands and flags
//! - Assemble them into a single shell line, creating the package directory for `package init`
//! - Execute the line blocking, or on a worker pool with a completion handler or future
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod project;

// Re-export commonly used types
pub use command::{
    BuildConfig, Command, CommandLine, Flag, PackageType, SWIFT_PROGRAM, Subcommand, assemble,
};
pub use config::ProjectConfig;
pub use error::{Error, Result};
pub use executor::{Executor, ShellExecutor};
pub use project::Project;

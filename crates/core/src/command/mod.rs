//! Swift package manager command encoding and assembly

pub mod assembler;
pub mod flag;
pub mod package;
pub mod swift_command;

// Re-export commonly used types
pub use assembler::{CommandLine, SWIFT_PROGRAM, assemble};
pub use flag::{BuildConfig, Flag};
pub use package::{PackageType, Subcommand};
pub use swift_command::Command;

//! Configuration management for buildkit

mod settings;

// Re-export main types
pub use settings::{CONFIG_FILE_NAMES, ProjectConfig};

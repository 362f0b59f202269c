//! Facade over `buildkit-core` used by the workspace integration tests

pub use buildkit_core::*;

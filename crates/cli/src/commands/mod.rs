pub mod config;
pub mod run;

pub use config::config_command;
pub use run::run_command;

pub mod command_breakdown;

pub use command_breakdown::{format_command_breakdown, print_command_breakdown};

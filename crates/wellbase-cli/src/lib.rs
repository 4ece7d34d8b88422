mod args;
mod commands;
mod handlers;
pub mod output;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::{exit_code, run};

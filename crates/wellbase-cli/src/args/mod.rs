mod commands;

pub use commands::*;

use crate::types::{LogLevel, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wellbase")]
#[command(about = "Aggregate reservoir well data from CSV and LAS directory trees", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory holding config.toml and the default roots [default: ~/.wellbase]
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Config file to use instead of <data-dir>/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Override the reservoirs root
    #[arg(long, global = true)]
    pub reservoirs_root: Option<PathBuf>,

    /// Override the files root used by `file`
    #[arg(long, global = true)]
    pub files_root: Option<PathBuf>,

    /// Override the data root used by `page`
    #[arg(long, global = true)]
    pub data_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

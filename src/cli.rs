use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "weft",
    about = "Merges voxel worlds together, using an image as a template",
    version,
)]
pub struct Cli {
    /// Directory holding weft.toml, the map image, and the worlds/ folder.
    #[arg(long, global = true, default_value = ".")]
    pub data_dir: PathBuf,

    /// Minimum level written to the terminal and the log file.
    #[arg(long, global = true, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a full merge pass over the template image
    Start {
        /// Also log every merged and skipped column
        #[arg(long)]
        verbose: bool,
    },
    /// Re-run preparation and report what a merge would use
    Reload,
    /// Print name, version, and description
    Version,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

/// Practice typing real code, one lesson file at a time
#[derive(Debug, Parser)]
#[command(name = "codetype", version, about)]
pub struct Cli {
    /// Configuration directory (default: the platform config directory)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List available lessons
    List,

    /// Validate a lesson and show its segment layout
    Check {
        /// Lesson id
        lesson: String,

        /// File to show (default: the first file of the lesson)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Replay a key script against a lesson file and print the result
    Replay {
        /// Lesson id
        lesson: String,

        /// Key script to replay
        #[arg(short, long, value_name = "PATH")]
        keys: PathBuf,

        /// File to type (default: the first file of the lesson)
        #[arg(short, long)]
        file: Option<String>,

        /// Report format (default: the `output_format` setting)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

impl Cli {
    /// Log level implied by `-v`, overridden by `RUST_LOG`
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

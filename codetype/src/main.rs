use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::Error;

mod cli;
mod commands;
mod config;
mod error;
mod lesson;
mod replay;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::get(cli.config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::List => commands::list(&config, &mut out),
        Commands::Check { lesson, file } => {
            commands::check(&config, &lesson, file.as_deref(), &mut out)
        }
        Commands::Replay {
            lesson,
            keys,
            file,
            format,
        } => commands::replay(
            &config,
            &lesson,
            &keys,
            file.as_deref(),
            format,
            &mut out,
        ),
    }
}

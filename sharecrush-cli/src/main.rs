// sharecrush-cli/src/main.rs
//
// Entry point for the sharecrush CLI: parses arguments, sets up logging,
// verifies external tools, and dispatches to the build or apply command.

use clap::Parser;
use env_logger::Env;
use std::process;

mod cli;
mod commands;
mod progress;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = sharecrush_core::check_external_tools() {
        log::error!("{e}");
        process::exit(1);
    }

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args),
        Commands::Apply(args) => commands::apply::run(args),
    };

    if let Err(e) = result {
        log::error!("{e}");
        process::exit(1);
    }
}

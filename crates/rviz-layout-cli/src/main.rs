//! Display layout checker CLI.

use clap::Parser;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_check, run_displays, run_fmt};

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .format_timestamp(None)
        .init();

    let result = match &cli.command {
        Command::Check(args) => run_check(args),
        Command::Fmt(args) => run_fmt(args).map(|()| true),
        Command::Displays(args) => run_displays(args).map(|()| true),
    };
    let exit_code = match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

//! pagekit CLI
//!
//! ## Usage
//!
//! ```bash
//! pagekit config show --format json          # Effective defaults
//! pagekit config validate --file runner.yaml # Check a runner config
//! pagekit selector --file login.yaml --name username
//! pagekit url --base http://app/login --append next=%2F
//! ```

use clap::Parser;
use pagekit_cli::{handlers, logging, Cli, CliResult, Commands, Verbosity};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    logging::init(verbosity, cli.log_format)?;

    let output = match &cli.command {
        Commands::Config(args) => handlers::run_config(&args.action)?,
        Commands::Selector(args) => handlers::run_selector(args)?,
        Commands::Url(args) => handlers::run_url(args)?,
    };
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
    Ok(())
}

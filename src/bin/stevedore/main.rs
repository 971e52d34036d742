//! Stevedore CLI - resolves build descriptors into validated build plans
//!
//! Exit codes: 0 when every requested plan is emitted, 1 when validation
//! rejects a plan (or another runtime failure), 2 for malformed input.

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{Rejected, Session};
use stevedore::InputError;

const EXIT_REJECTED: i32 = 1;
const EXIT_INPUT: i32 = 2;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        if let Some(input) = e.downcast_ref::<InputError>() {
            eprint!("{}", input.to_diagnostic().format(color));
            std::process::exit(EXIT_INPUT);
        }
        if e.downcast_ref::<Rejected>().is_some() {
            eprintln!("error: {}", e);
            std::process::exit(EXIT_REJECTED);
        }
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("stevedore=debug")
    } else {
        EnvFilter::new("stevedore=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .init();

    let session = Session::new(cli.manifest, cli.verbose, color)?;

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &session),
        Commands::Check(args) => commands::check::execute(args, &session),
        Commands::Plugins(args) => commands::plugins::execute(args, &session),
        Commands::Variants(args) => commands::variants::execute(args, &session),
        Commands::Init(args) => commands::init::execute(args, &session),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

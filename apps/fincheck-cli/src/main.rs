mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::Context;
use crate::config::FincheckConfig;
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(&cli) {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config_path = cli.config.clone().or_else(FincheckConfig::default_path);
    let config = FincheckConfig::load(config_path.as_deref())?;
    let ctx = Context::new(cli, config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli, &ctx, &mut out)
}

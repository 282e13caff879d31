// jack-analyzer: XML parse trees for Jack source files

use clap::Parser as ClapParser;
use jack_analyzer::cli::Cli;
use jack_analyzer::driver;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    let report = driver::run(&cli.paths, &config);

    for failure in &report.failures {
        eprintln!("Error: {}", failure);
    }

    if !report.is_success() {
        eprintln!(
            "{} of {} file(s) failed",
            report.failures.len(),
            report.failures.len() + report.written.len()
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

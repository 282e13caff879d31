//! CLI argument parsing tests

use clap::Parser as ClapParser;
use jack_analyzer::cli::Cli;
use jack_analyzer::driver::{AnalyzerConfig, OutputKind};
use jack_analyzer::emitter::Layout;
use std::path::PathBuf;

#[test]
fn cli_requires_a_path() {
    assert!(Cli::try_parse_from(["jack-analyzer"]).is_err());
}

#[test]
fn cli_defaults() {
    let cli = Cli::try_parse_from(["jack-analyzer", "Square"]).unwrap();

    assert_eq!(cli.paths, vec![PathBuf::from("Square")]);
    assert_eq!(cli.config(), AnalyzerConfig::default());
    assert_eq!(cli.log_level(), "warn");
}

#[test]
fn cli_all_flags() {
    let cli = Cli::try_parse_from([
        "jack-analyzer",
        "--tokens",
        "--compact",
        "-o",
        "out",
        "-vv",
        "Main.jack",
        "Square",
    ])
    .unwrap();

    let config = cli.config();
    assert_eq!(config.output, OutputKind::Tokens);
    assert_eq!(config.layout, Layout::Compact);
    assert_eq!(config.out_dir, Some(PathBuf::from("out")));
    assert_eq!(cli.paths.len(), 2);
    assert_eq!(cli.log_level(), "debug");
}

#[test]
fn cli_short_flags() {
    let cli = Cli::try_parse_from(["jack-analyzer", "-t", "-c", "-v", "Main.jack"]).unwrap();

    assert!(cli.tokens);
    assert!(cli.compact);
    assert_eq!(cli.log_level(), "info");
}

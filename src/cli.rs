//! Command-line arguments

use crate::driver::{AnalyzerConfig, OutputKind};
use crate::emitter::Layout;
use clap::Parser as ClapParser;
use std::path::PathBuf;

/// Syntax analyzer for Jack: writes an XML parse tree for every `.jack` file.
#[derive(Debug, ClapParser)]
#[command(name = "jack-analyzer", version, about)]
pub struct Cli {
    /// `.jack` files or directories containing them
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Write the token stream (`FooT.xml`) instead of the parse tree
    #[arg(short, long)]
    pub tokens: bool,

    /// Write XML without indentation or line breaks
    #[arg(short, long)]
    pub compact: bool,

    /// Directory for the XML files (defaults to next to each source)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Analyzer options selected by the flags.
    pub fn config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            output: if self.tokens {
                OutputKind::Tokens
            } else {
                OutputKind::Tree
            },
            layout: if self.compact {
                Layout::Compact
            } else {
                Layout::Indented
            },
            out_dir: self.out_dir.clone(),
        }
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

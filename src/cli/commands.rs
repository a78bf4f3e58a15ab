//! CLI definition using clap.

use clap::Parser;
use std::path::PathBuf;

/// Launchr - build and run the local development services
#[derive(Parser, Debug)]
#[command(name = "launchr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Development mode: always rebuild, run the dev commands
    #[arg(long)]
    pub dev: bool,

    /// Exit with status 1 if any service fails to build or run
    #[arg(long)]
    pub strict: bool,

    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse arguments, accepting the single-dash `-dev` spelling
    pub fn parse_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::parse_from(normalize_args(args))
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Rewrite `-dev` to `--dev`; clap would otherwise read it as `-d -e -v`.
pub fn normalize_args<I, T>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| if arg == "-dev" { "--dev".to_string() } else { arg })
        .collect()
}

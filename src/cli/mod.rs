//! CLI module for launchr - command-line flags.

pub mod commands;

pub use commands::Cli;

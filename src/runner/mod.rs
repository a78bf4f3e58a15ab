//! Command runner module - executes service build and run commands.
//!
//! This module provides:
//! - CommandRunner for resolving working directories and running commands
//! - ServiceHandle for a started run command
//! - Platform shell selection

mod command_runner;
mod shell;

pub use command_runner::{CommandRunner, ServiceHandle};
pub use shell::{shell_command, shell_program};

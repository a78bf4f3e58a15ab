//! Launchr - a local development launcher
//!
//! Launchr builds and runs a fixed set of services side by side, forwarding
//! their output to the console until every one of them has exited.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod registry;
pub mod runner;

pub use error::{LaunchrError, Result};

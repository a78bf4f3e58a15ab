use colored::*;
use eyre::{Context, Result};
use log::info;

use launchr::cli::Cli;
use launchr::config::Config;
use launchr::logging::{self, ORCHESTRATOR_NAMESPACE};
use launchr::orchestrator::{Orchestrator, RunReport};
use launchr::registry::ServiceRegistry;
use launchr::runner::CommandRunner;

fn setup_logging(cli: &Cli) -> Result<()> {
    logging::init(logging::resolve_level(None, cli.is_verbose())).context("Failed to setup logging")
}

async fn run_application(cli: &Cli, config: &Config) -> Result<RunReport> {
    if cli.dev {
        println!("{}", "Development mode enabled".yellow());
    }

    let registry = ServiceRegistry::builtin(cli.dev);
    info!(target: ORCHESTRATOR_NAMESPACE, "Launching services: {}", registry.names().join(", "));

    let mut orchestrator = Orchestrator::new(registry, CommandRunner::new(), config.orchestrator_settings(cli.dev));
    let report = orchestrator.run().await;

    let failures = report.failures();
    if failures.is_empty() {
        info!(target: ORCHESTRATOR_NAMESPACE, "All services exited");
    } else {
        let names: Vec<&str> = failures.iter().map(|r| r.name.as_str()).collect();
        log::warn!(target: ORCHESTRATOR_NAMESPACE, "All services exited, failures in: {}", names.join(", "));
    }

    Ok(report)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args(std::env::args());

    // Setup logging first so config loading can report problems
    setup_logging(&cli)?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    logging::set_level(logging::resolve_level(config.log_level.as_deref(), cli.is_verbose()));

    let report = run_application(&cli, &config).await.context("Application failed")?;

    let code = report.exit_code(cli.strict || config.strict);
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

//! Orchestrator implementation.
//!
//! A run moves through `Idle -> DecidingRebuild -> Building -> Running -> Drained`.
//! Builds run one after another on the orchestrator's path, each right before
//! its service's run task is spawned; run tasks execute in parallel and the
//! orchestrator returns once all of them have exited. Service failures are
//! logged and collected in the [`RunReport`], never propagated.

use std::collections::HashMap;

use futures::future::join_all;

use super::decision::{RebuildDecision, RebuildReason, decide_rebuild, probe_markers};
use super::prompt::{LinePrompter, Prompter, REBUILD_QUESTION};
use super::report::{RunReport, RunResult};
use crate::logging::{ORCHESTRATOR_NAMESPACE, ServiceLogger};
use crate::registry::{ServiceRegistry, ServiceSpec};
use crate::runner::CommandRunner;

/// Default build output directory checked before prompting
pub const DEFAULT_BUILD_MARKER: &str = "dist";

#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Always rebuild, never prompt
    pub dev_mode: bool,
    /// Subdirectory whose presence means a service was built before
    pub build_marker: String,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            dev_mode: false,
            build_marker: DEFAULT_BUILD_MARKER.to_string(),
        }
    }
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    DecidingRebuild,
    Building,
    Running,
    Drained,
}

pub struct Orchestrator {
    registry: ServiceRegistry,
    runner: CommandRunner,
    settings: OrchestratorSettings,
    loggers: HashMap<String, ServiceLogger>,
    prompter: Box<dyn Prompter + Send>,
    phase: Phase,
}

impl Orchestrator {
    /// Create an orchestrator that prompts on stdin/stdout.
    pub fn new(registry: ServiceRegistry, runner: CommandRunner, settings: OrchestratorSettings) -> Self {
        let loggers = registry
            .list_services()
            .keys()
            .map(|name| (name.clone(), ServiceLogger::for_service(name)))
            .collect();

        Self {
            registry,
            runner,
            settings,
            loggers,
            prompter: Box::new(LinePrompter::stdio()),
            phase: Phase::Idle,
        }
    }

    /// Replace the operator prompt.
    pub fn with_prompter(mut self, prompter: Box<dyn Prompter + Send>) -> Self {
        self.prompter = prompter;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    fn transition(&mut self, next: Phase) {
        log::debug!(target: ORCHESTRATOR_NAMESPACE, "Phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    fn logger(&self, name: &str) -> ServiceLogger {
        self.loggers
            .get(name)
            .cloned()
            .unwrap_or_else(|| ServiceLogger::for_service(name))
    }

    /// Decide whether services get rebuilt, prompting the operator if needed.
    ///
    /// A prompt that cannot be answered counts as "no".
    pub fn decide(&mut self) -> bool {
        self.transition(Phase::DecidingRebuild);

        let markers = if self.settings.dev_mode {
            Vec::new()
        } else {
            probe_markers(&self.registry, &self.runner, &self.settings.build_marker)
        };

        match decide_rebuild(self.settings.dev_mode, &markers) {
            RebuildDecision::Forced(RebuildReason::DevMode) => {
                log::info!(target: ORCHESTRATOR_NAMESPACE, "Development mode, rebuilding all services");
                true
            }
            RebuildDecision::Forced(RebuildReason::MissingMarkers(missing)) => {
                log::info!(
                    target: ORCHESTRATOR_NAMESPACE,
                    "Rebuilding, no build output for: {}",
                    missing.join(", ")
                );
                true
            }
            RebuildDecision::AskOperator => match self.prompter.confirm(REBUILD_QUESTION) {
                Ok(answer) => answer,
                Err(e) => {
                    log::warn!(target: ORCHESTRATOR_NAMESPACE, "{}, skipping rebuild", e);
                    false
                }
            },
        }
    }

    /// Build (if needed) and run every service, returning once all have exited.
    pub async fn run(&mut self) -> RunReport {
        let rebuild = self.decide();

        let mut specs: Vec<ServiceSpec> = self.registry.list_services().values().cloned().collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));

        if rebuild {
            self.transition(Phase::Building);
        }

        let mut names = Vec::with_capacity(specs.len());
        let mut tasks = Vec::with_capacity(specs.len());

        for spec in specs {
            let logger = self.logger(&spec.name);

            let mut build_error = None;
            if rebuild {
                logger.info(format!("Building {}", spec.name));
                logger.debug(format!("$ {}", spec.build_command));
                if let Err(e) = self.runner.build(&spec).await {
                    logger.error(&e);
                    build_error = Some(e.to_string());
                }
            }

            let runner = self.runner.clone();
            names.push(spec.name.clone());
            tasks.push(tokio::spawn(async move {
                logger.info(format!("Starting {}", spec.name));
                logger.debug(format!("$ {}", spec.run_command));
                let exit_error = match runner.start(&spec).wait().await {
                    Ok(()) => {
                        logger.info(format!("{} exited", spec.name));
                        None
                    }
                    Err(e) => {
                        logger.error(&e);
                        Some(e.to_string())
                    }
                };
                RunResult {
                    name: spec.name,
                    build_error,
                    exit_error,
                }
            }));
        }

        self.transition(Phase::Running);

        let results = join_all(tasks)
            .await
            .into_iter()
            .zip(names)
            .map(|(joined, name)| {
                joined.unwrap_or_else(|e| {
                    log::error!(target: ORCHESTRATOR_NAMESPACE, "Task for {} failed: {}", name, e);
                    RunResult {
                        name,
                        build_error: None,
                        exit_error: Some(e.to_string()),
                    }
                })
            })
            .collect();

        self.transition(Phase::Drained);
        RunReport::new(rebuild, results)
    }
}

//! Orchestrator module - decides whether to rebuild, then launches every
//! service and waits for all of them to exit.
//!
//! This module provides:
//! - Orchestrator driving a run from Idle to Drained
//! - Rebuild decision logic, kept free of terminal I/O
//! - Operator prompt abstraction
//! - RunReport with per-service outcomes

mod decision;
mod launcher;
mod prompt;
mod report;

pub use decision::{MarkerStatus, RebuildDecision, RebuildReason, decide_rebuild, probe_markers};
pub use launcher::{DEFAULT_BUILD_MARKER, Orchestrator, OrchestratorSettings, Phase};
pub use prompt::{LinePrompter, Prompter, REBUILD_QUESTION, is_affirmative};
pub use report::{RunReport, RunResult};

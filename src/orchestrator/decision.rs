//! Rebuild decision.
//!
//! Probing the filesystem and deciding are split so the decision is a pure
//! function of the mode flag and the probe results.

use crate::logging::ORCHESTRATOR_NAMESPACE;
use crate::registry::ServiceRegistry;
use crate::runner::CommandRunner;

/// Whether a service's build output directory exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStatus {
    pub service: String,
    pub present: bool,
}

/// Why a rebuild happens without asking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildReason {
    /// Development mode always rebuilds
    DevMode,
    /// These services have no build output
    MissingMarkers(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildDecision {
    /// Rebuild without prompting
    Forced(RebuildReason),
    /// Every service has build output; ask the operator
    AskOperator,
}

impl RebuildDecision {
    pub fn is_forced(&self) -> bool {
        matches!(self, RebuildDecision::Forced(_))
    }
}

/// Check each service directory for the `marker` subdirectory.
///
/// A service whose directory cannot be resolved counts as missing.
pub fn probe_markers(registry: &ServiceRegistry, runner: &CommandRunner, marker: &str) -> Vec<MarkerStatus> {
    registry
        .names()
        .into_iter()
        .filter_map(|name| registry.get(name))
        .map(|spec| {
            let present = match runner.resolve_dir(spec) {
                Ok(dir) => dir.join(marker).is_dir(),
                Err(e) => {
                    log::warn!(target: ORCHESTRATOR_NAMESPACE, "Cannot resolve path for {}: {}", spec.name, e);
                    false
                }
            };
            if !present {
                log::info!(
                    target: ORCHESTRATOR_NAMESPACE,
                    "No {} directory found for {}, a rebuild is required",
                    marker,
                    spec.name
                );
            }
            MarkerStatus {
                service: spec.name.clone(),
                present,
            }
        })
        .collect()
}

pub fn decide_rebuild(dev_mode: bool, markers: &[MarkerStatus]) -> RebuildDecision {
    if dev_mode {
        return RebuildDecision::Forced(RebuildReason::DevMode);
    }

    let missing: Vec<String> = markers
        .iter()
        .filter(|m| !m.present)
        .map(|m| m.service.clone())
        .collect();

    if missing.is_empty() {
        RebuildDecision::AskOperator
    } else {
        RebuildDecision::Forced(RebuildReason::MissingMarkers(missing))
    }
}

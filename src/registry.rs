//! Service registry - the table of services launched together.
//!
//! Each service is a pair of shell command lines (build, run) confined to a
//! working directory relative to where the launcher is started. The table is
//! compiled in, with an alternate set of commands for development mode, and is
//! handed to the orchestrator as a value so tests can supply their own.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A single launchable service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    /// Unique service name
    pub name: String,
    /// Shell command line that builds the service
    pub build_command: String,
    /// Shell command line that runs the service
    pub run_command: String,
    /// Working directory, relative to the launcher's current directory
    pub working_directory: PathBuf,
}

impl ServiceSpec {
    pub fn new(
        name: impl Into<String>,
        build_command: impl Into<String>,
        run_command: impl Into<String>,
        working_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            build_command: build_command.into(),
            run_command: run_command.into(),
            working_directory: working_directory.into(),
        }
    }
}

/// Name-keyed set of services. Iteration order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    services: HashMap<String, ServiceSpec>,
}

impl ServiceRegistry {
    /// Build a registry from specs. A later spec with a repeated name replaces the earlier one.
    pub fn new(specs: impl IntoIterator<Item = ServiceSpec>) -> Self {
        let services = specs.into_iter().map(|spec| (spec.name.clone(), spec)).collect();
        Self { services }
    }

    /// The compiled-in service table.
    pub fn builtin(dev_mode: bool) -> Self {
        let (build, run) = if dev_mode {
            ("yarn install", "yarn run dev")
        } else {
            ("yarn run build", "yarn run start")
        };

        Self::new([
            ServiceSpec::new("nextjs", build, run, Path::new("..")),
            ServiceSpec::new("cron", build, run, Path::new("..").join("cron")),
        ])
    }

    /// All services keyed by name
    pub fn list_services(&self) -> &HashMap<String, ServiceSpec> {
        &self.services
    }

    /// Configured (relative) working directory of a service
    pub fn path_of(&self, name: &str) -> Option<&Path> {
        self.services.get(name).map(|spec| spec.working_directory.as_path())
    }

    pub fn get(&self, name: &str) -> Option<&ServiceSpec> {
        self.services.get(name)
    }

    /// Service names, sorted for stable display
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.services.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

//! Runs a service's build and run commands through the host shell.
//!
//! Child stdout/stderr are inherited so output reaches the console live.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::{Child, Command};

use super::shell::shell_command;
use crate::error::{LaunchrError, Result};
use crate::registry::ServiceSpec;

/// Resolves service directories and executes their commands.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    /// Fixed base directory; `None` means the process's current directory
    base_dir: Option<PathBuf>,
}

impl CommandRunner {
    /// Runner that resolves against the current directory at call time
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that resolves against a fixed base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(LaunchrError::PathResolution),
        }
    }

    /// Absolute working directory of a service
    pub fn resolve_dir(&self, spec: &ServiceSpec) -> Result<PathBuf> {
        Ok(self.base_dir()?.join(&spec.working_directory))
    }

    /// Run the build command to completion.
    pub async fn build(&self, spec: &ServiceSpec) -> Result<()> {
        let dir = self.resolve_dir(spec)?;
        let mut cmd = shell_command(&spec.build_command);
        inherit_stdio(&mut cmd).current_dir(&dir);

        let status = cmd.status().await.map_err(|e| LaunchrError::Build {
            service: spec.name.clone(),
            reason: e.to_string(),
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchrError::Build {
                service: spec.name.clone(),
                reason: status.to_string(),
            })
        }
    }

    /// Spawn the run command without waiting for it.
    ///
    /// A spawn failure is carried in the handle and surfaces from [`ServiceHandle::wait`].
    pub fn start(&self, spec: &ServiceSpec) -> ServiceHandle {
        let child = self.resolve_dir(spec).and_then(|dir| {
            let mut cmd = shell_command(&spec.run_command);
            inherit_stdio(&mut cmd).current_dir(&dir);
            cmd.spawn().map_err(|e| LaunchrError::Run {
                service: spec.name.clone(),
                reason: e.to_string(),
            })
        });

        ServiceHandle {
            name: spec.name.clone(),
            child,
        }
    }
}

fn inherit_stdio(cmd: &mut Command) -> &mut Command {
    cmd.stdin(Stdio::null()).stdout(Stdio::inherit()).stderr(Stdio::inherit())
}

/// A started (or failed-to-start) run command.
#[derive(Debug)]
pub struct ServiceHandle {
    name: String,
    child: Result<Child>,
}

impl ServiceHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// OS process id, if the command started
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().ok().and_then(Child::id)
    }

    /// Block until the process exits.
    pub async fn wait(self) -> Result<()> {
        let mut child = self.child?;
        let status = child.wait().await.map_err(|e| LaunchrError::Run {
            service: self.name.clone(),
            reason: e.to_string(),
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchrError::Run {
                service: self.name,
                reason: status.to_string(),
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn spec(build: &str, run: &str, dir: &str) -> ServiceSpec {
        ServiceSpec::new("svc", build, run, dir)
    }

    #[test]
    fn test_resolve_dir_joins_base() {
        let runner = CommandRunner::with_base_dir("/srv/app");
        let resolved = runner.resolve_dir(&spec("true", "true", "cron")).unwrap();
        assert_eq!(resolved, Path::new("/srv/app/cron"));
    }

    #[test]
    fn test_resolve_dir_uses_current_dir() {
        let runner = CommandRunner::new();
        let resolved = runner.resolve_dir(&spec("true", "true", "sub")).unwrap();
        assert_eq!(resolved, std::env::current_dir().unwrap().join("sub"));
    }

    #[tokio::test]
    async fn test_build_success() {
        let dir = tempdir().unwrap();
        let runner = CommandRunner::with_base_dir(dir.path());
        assert!(runner.build(&spec("true", "true", ".")).await.is_ok());
    }

    #[tokio::test]
    async fn test_build_runs_in_service_dir() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("web")).unwrap();
        let runner = CommandRunner::with_base_dir(dir.path());

        runner.build(&spec("echo built > marker.txt", "true", "web")).await.unwrap();

        let marker = std::fs::read_to_string(dir.path().join("web").join("marker.txt")).unwrap();
        assert_eq!(marker.trim(), "built");
    }

    #[tokio::test]
    async fn test_build_failure_reports_status() {
        let dir = tempdir().unwrap();
        let runner = CommandRunner::with_base_dir(dir.path());

        let err = runner.build(&spec("exit 1", "true", ".")).await.unwrap_err();
        match err {
            LaunchrError::Build { service, reason } => {
                assert_eq!(service, "svc");
                assert!(reason.contains('1'));
            }
            other => panic!("Expected build error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_build_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let runner = CommandRunner::with_base_dir(dir.path());
        let err = runner.build(&spec("true", "true", "does-not-exist")).await.unwrap_err();
        assert!(matches!(err, LaunchrError::Build { .. }));
    }

    #[tokio::test]
    async fn test_start_and_wait_success() {
        let dir = tempdir().unwrap();
        let runner = CommandRunner::with_base_dir(dir.path());

        let handle = runner.start(&spec("true", "true", "."));
        assert_eq!(handle.name(), "svc");
        assert!(handle.pid().is_some());
        assert!(handle.wait().await.is_ok());
    }

    #[tokio::test]
    async fn test_wait_reports_nonzero_exit() {
        let dir = tempdir().unwrap();
        let runner = CommandRunner::with_base_dir(dir.path());

        let err = runner.start(&spec("true", "exit 3", ".")).wait().await.unwrap_err();
        assert!(matches!(err, LaunchrError::Run { .. }));
        assert!(err.to_string().contains('3'));
    }

    #[tokio::test]
    async fn test_start_failure_surfaces_on_wait() {
        let dir = tempdir().unwrap();
        let runner = CommandRunner::with_base_dir(dir.path());

        let handle = runner.start(&spec("true", "true", "does-not-exist"));
        assert!(handle.pid().is_none());
        let err = handle.wait().await.unwrap_err();
        assert_eq!(err.service(), Some("svc"));
    }
}

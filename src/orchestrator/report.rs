//! Run outcome types.

/// Outcome of one service's build and run phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub name: String,
    /// Set when a requested build failed
    pub build_error: Option<String>,
    /// Set when the run command failed to start or exited non-zero
    pub exit_error: Option<String>,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        self.build_error.is_none() && self.exit_error.is_none()
    }
}

/// Aggregate outcome of a whole run, sorted by service name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Whether build commands were run
    pub rebuilt: bool,
    pub results: Vec<RunResult>,
}

impl RunReport {
    pub fn new(rebuilt: bool, mut results: Vec<RunResult>) -> Self {
        results.sort_by(|a, b| a.name.cmp(&b.name));
        Self { rebuilt, results }
    }

    pub fn result(&self, name: &str) -> Option<&RunResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn failures(&self) -> Vec<&RunResult> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| !r.is_success())
    }

    /// Process exit status: always 0 unless `strict` and something failed.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && self.has_failures() { 1 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(name: &str) -> RunResult {
        RunResult {
            name: name.to_string(),
            build_error: None,
            exit_error: None,
        }
    }

    fn build_failed(name: &str) -> RunResult {
        RunResult {
            build_error: Some("exit status: 1".to_string()),
            ..ok(name)
        }
    }

    #[test]
    fn test_results_sorted_by_name() {
        let report = RunReport::new(true, vec![ok("web"), ok("cron"), ok("api")]);
        let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["api", "cron", "web"]);
    }

    #[test]
    fn test_failures() {
        let report = RunReport::new(true, vec![ok("a"), build_failed("b")]);
        assert!(report.has_failures());
        assert_eq!(report.failures().len(), 1);
        assert_eq!(report.failures()[0].name, "b");
        assert!(report.result("a").unwrap().is_success());
        assert!(report.result("missing").is_none());
    }

    #[test]
    fn test_exit_code_lenient_by_default() {
        let report = RunReport::new(true, vec![build_failed("a")]);
        assert_eq!(report.exit_code(false), 0);
        assert_eq!(report.exit_code(true), 1);
    }

    #[test]
    fn test_exit_code_clean_run() {
        let report = RunReport::new(false, vec![ok("a")]);
        assert_eq!(report.exit_code(true), 0);
    }
}

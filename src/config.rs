use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::orchestrator::{DEFAULT_BUILD_MARKER, OrchestratorSettings};

/// Launcher settings. The service table itself is compiled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    /// Build output directory checked in each service directory
    pub build_marker: String,
    /// Exit non-zero when any service fails
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            build_marker: DEFAULT_BUILD_MARKER.to_string(),
            strict: false,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();

        // Primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        // Fallback location: ./<project>.yml
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        Ok(Self::load_first(&candidates))
    }

    /// First candidate that loads; unreadable ones are logged and skipped.
    pub fn load_first(candidates: &[PathBuf]) -> Self {
        if let Some(config) = candidates.iter().find_map(|path| Self::try_load(path)) {
            return config;
        }

        log::info!("No config file found, using defaults");
        Self::default()
    }

    fn try_load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config from {}: {}", path.display(), e);
                None
            }
        }
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Orchestrator settings for the given mode
    pub fn orchestrator_settings(&self, dev_mode: bool) -> OrchestratorSettings {
        OrchestratorSettings {
            dev_mode,
            build_marker: self.build_marker.clone(),
        }
    }
}

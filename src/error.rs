//! Error types for Launchr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while launching services
#[derive(Debug, Error)]
pub enum LaunchrError {
    /// Build command could not start or exited non-zero
    #[error("Build failed for {service}: {reason}")]
    Build { service: String, reason: String },

    /// Run command could not start or exited non-zero
    #[error("Run failed for {service}: {reason}")]
    Run { service: String, reason: String },

    /// Current working directory could not be determined
    #[error("Failed to resolve working directory: {0}")]
    PathResolution(std::io::Error),

    /// Service name not present in the registry
    #[error("Unknown service: {0}")]
    UnknownService(String),

    /// Operator prompt could not be written or read
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LaunchrError {
    /// Name of the service the error originated from, if any
    pub fn service(&self) -> Option<&str> {
        match self {
            LaunchrError::Build { service, .. } | LaunchrError::Run { service, .. } => Some(service),
            LaunchrError::UnknownService(name) => Some(name),
            _ => None,
        }
    }
}

/// Result type alias for Launchr operations
pub type Result<T> = std::result::Result<T, LaunchrError>;

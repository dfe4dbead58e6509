//! Backend error types

use thiserror::Error;

use crate::diagnostics::Diagnostics;

/// Errors outside the diagnostics model: loading and parsing a configuration,
/// or using a backend that was never configured.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration structure: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Backend has not been configured")]
    NotConfigured,

    #[error("Configuration has errors:\n\n{0}")]
    Diagnostics(Diagnostics),
}

impl BackendError {
    /// Convert error-bearing diagnostics into an error, passing clean ones through
    pub fn from_diagnostics(diags: Diagnostics) -> Result<Diagnostics, BackendError> {
        if diags.has_errors() {
            Err(BackendError::Diagnostics(diags))
        } else {
            Ok(diags)
        }
    }
}

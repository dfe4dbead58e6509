//! S3 remote-state backend configuration

// Public modules
pub mod auth;
pub mod backend;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use backend::S3Backend;
pub use config::RawConfig;
pub use diagnostics::{AttributePath, Diagnostic, Diagnostics, Severity};
pub use error::BackendError;
pub use state::ResolvedBackendState;

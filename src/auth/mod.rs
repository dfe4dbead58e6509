//! Authentication
//!
//! Assembling the request handed to the credential provider, and the provider
//! seam itself.

mod provider;
mod request;

pub use provider::{
    AuthProvider, ProviderDiagnostic, ProviderResolution, ProviderSeverity, SdkAuthProvider,
};
pub use request::{AssumeRoleRequest, AuthRequest, MetadataServiceState, UserAgentProduct};

//! Authentication provider
//!
//! Turns an [`AuthRequest`] into a provider-neutral [`SdkConfig`] that the S3
//! and DynamoDB clients are built from.

use async_trait::async_trait;
use aws_config::environment::credentials::EnvironmentVariableCredentialsProvider;
use aws_config::meta::credentials::CredentialsProviderChain;
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::retry::RetryConfig;
use aws_config::sts::AssumeRoleProvider;
use aws_config::{AppName, BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use aws_sdk_sts::error::DisplayErrorContext;

use super::request::{AssumeRoleRequest, AuthRequest, MetadataServiceState};
use crate::config::aws::create_sts_client;
use crate::diagnostics::{Diagnostic, Severity};

/// Severity reported by an authentication provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSeverity {
    Error,
    Warning,
}

impl From<ProviderSeverity> for Severity {
    fn from(severity: ProviderSeverity) -> Self {
        match severity {
            ProviderSeverity::Error => Severity::Error,
            ProviderSeverity::Warning => Severity::Warning,
        }
    }
}

/// A finding reported by an authentication provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDiagnostic {
    pub severity: ProviderSeverity,
    pub summary: String,
    pub detail: String,
}

impl ProviderDiagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: ProviderSeverity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: ProviderSeverity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl From<ProviderDiagnostic> for Diagnostic {
    fn from(d: ProviderDiagnostic) -> Self {
        Diagnostic::sourceless(d.severity.into(), d.summary, d.detail)
    }
}

/// Outcome of resolving an [`AuthRequest`]
#[derive(Debug, Clone, Default)]
pub struct ProviderResolution {
    /// `None` when the provider could not produce a configuration
    pub config: Option<SdkConfig>,
    pub diagnostics: Vec<ProviderDiagnostic>,
}

impl ProviderResolution {
    fn failed(diagnostics: Vec<ProviderDiagnostic>) -> Self {
        Self {
            config: None,
            diagnostics,
        }
    }
}

/// Resolves credentials and client configuration
///
/// Implementations may perform network calls (credential validation, role
/// assumption, instance metadata).
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn resolve(&self, request: &AuthRequest) -> ProviderResolution;
}

/// SDK app name carrying the user agent products, or the caller name when
/// there are none
///
/// App names only allow a restricted character set, so separators become `-`.
fn app_name_token(request: &AuthRequest) -> String {
    let source = if request.user_agent.is_empty() {
        request.caller_name.clone()
    } else {
        request.user_agent_string()
    };
    source
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// [`AuthProvider`] backed by the AWS SDK default configuration loader
#[derive(Debug, Clone, Copy, Default)]
pub struct SdkAuthProvider;

impl SdkAuthProvider {
    pub fn new() -> Self {
        Self
    }

    fn profile_files(request: &AuthRequest) -> Option<ProfileFiles> {
        if request.shared_credentials_files.is_empty() && request.shared_config_files.is_empty() {
            return None;
        }

        let mut builder = ProfileFiles::builder()
            .include_default_credentials_file(true)
            .include_default_config_file(true);
        for path in &request.shared_credentials_files {
            builder = builder.with_file(ProfileFileKind::Credentials, path);
        }
        for path in &request.shared_config_files {
            builder = builder.with_file(ProfileFileKind::Config, path);
        }
        Some(builder.build())
    }

    /// Credentials chain that never consults the instance metadata service
    fn chain_without_imds(
        profile: Option<&str>,
        profile_files: Option<ProfileFiles>,
    ) -> CredentialsProviderChain {
        let mut profile_provider = ProfileFileCredentialsProvider::builder();
        if let Some(name) = profile {
            profile_provider = profile_provider.profile_name(name);
        }
        if let Some(files) = profile_files {
            profile_provider = profile_provider.profile_files(files);
        }

        CredentialsProviderChain::first_try(
            "Environment",
            EnvironmentVariableCredentialsProvider::new(),
        )
        .or_else("Profile", profile_provider.build())
    }

    async fn build_base_config(
        request: &AuthRequest,
        diagnostics: &mut Vec<ProviderDiagnostic>,
    ) -> SdkConfig {
        let max_attempts = request.max_retries.saturating_add(1);
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(RetryConfig::standard().with_max_attempts(max_attempts));

        if let Some(region) = request.region.as_deref().filter(|r| !r.is_empty()) {
            loader = loader.region(Region::new(region.to_string()));
        }

        let profile = request.profile.as_deref().filter(|p| !p.is_empty());
        if let Some(name) = profile {
            loader = loader.profile_name(name);
        }

        let profile_files = Self::profile_files(request);
        if let Some(files) = profile_files.clone() {
            loader = loader.profile_files(files);
        }

        match AppName::new(app_name_token(request)) {
            Ok(app_name) => loader = loader.app_name(app_name),
            Err(e) => tracing::debug!(error = %e, "Skipping invalid app name"),
        }

        if let Some((access_key, secret_key, token)) = request.static_credentials() {
            loader = loader.credentials_provider(Credentials::new(
                access_key,
                secret_key,
                token.map(str::to_string),
                None,
                "s3-backend-static",
            ));
        } else if request.metadata_service == Some(MetadataServiceState::Disabled) {
            tracing::debug!("EC2 metadata service disabled for credential resolution");
            loader = loader.credentials_provider(Self::chain_without_imds(profile, profile_files));
        }

        if let Some(iam_endpoint) = &request.iam_endpoint {
            diagnostics.push(ProviderDiagnostic::warning(
                "IAM endpoint override not used",
                format!(
                    "The IAM endpoint {:?} is not contacted during credential resolution.",
                    iam_endpoint
                ),
            ));
        }

        loader.load().await
    }

    /// Confirm the resolved credentials with STS `GetCallerIdentity`
    async fn validate_credentials(
        config: &SdkConfig,
        sts_endpoint: Option<&str>,
    ) -> Result<(), String> {
        if config.credentials_provider().is_none() {
            return Err("no credentials provider configured".to_string());
        }

        let identity = create_sts_client(config, sts_endpoint)
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| DisplayErrorContext(&e).to_string())?;

        tracing::debug!(
            account = ?identity.account(),
            arn = ?identity.arn(),
            "Validated AWS credentials"
        );
        Ok(())
    }

    async fn assume_role(
        base: SdkConfig,
        request: &AuthRequest,
        role: &AssumeRoleRequest,
        diagnostics: &mut Vec<ProviderDiagnostic>,
    ) -> Result<SdkConfig, ProviderDiagnostic> {
        let Some(base_credentials) = base.credentials_provider() else {
            return Err(ProviderDiagnostic::error(
                "No valid credential sources found",
                "Credentials are required to assume a role, but none were resolved.",
            ));
        };

        let sts_config = match request.sts_endpoint.as_deref().filter(|e| !e.is_empty()) {
            Some(endpoint) => {
                tracing::info!(endpoint = %endpoint, "Using custom STS endpoint");
                base.clone().into_builder().endpoint_url(endpoint).build()
            }
            None => base.clone(),
        };

        let mut builder = AssumeRoleProvider::builder(role.role_arn.clone()).configure(&sts_config);
        if let Some(name) = role.session_name.as_deref().filter(|v| !v.is_empty()) {
            builder = builder.session_name(name);
        }
        if let Some(external_id) = role.external_id.as_deref().filter(|v| !v.is_empty()) {
            builder = builder.external_id(external_id);
        }
        if let Some(policy) = role.policy.as_deref().filter(|v| !v.is_empty()) {
            builder = builder.policy(policy);
        }
        if !role.policy_arns.is_empty() {
            builder = builder.policy_arns(role.policy_arns.clone());
        }
        if let Some(duration) = role.duration {
            builder = builder.session_length(duration);
        }

        if !role.tags.is_empty() || !role.transitive_tag_keys.is_empty() {
            diagnostics.push(ProviderDiagnostic::warning(
                "Assume role session tags ignored",
                "Session tags and transitive tag keys are not supported by this credential provider.",
            ));
        }

        tracing::info!(role_arn = %role.role_arn, "Assuming IAM role");
        let provider = builder.build_from_provider(base_credentials).await;

        Ok(base
            .into_builder()
            .credentials_provider(SharedCredentialsProvider::new(provider))
            .build())
    }
}

#[async_trait]
impl AuthProvider for SdkAuthProvider {
    async fn resolve(&self, request: &AuthRequest) -> ProviderResolution {
        let mut diagnostics = Vec::new();

        let mut config = Self::build_base_config(request, &mut diagnostics).await;

        if let Some(role) = &request.assume_role {
            config = match Self::assume_role(config, request, role, &mut diagnostics).await {
                Ok(config) => config,
                Err(diagnostic) => {
                    diagnostics.push(diagnostic);
                    return ProviderResolution::failed(diagnostics);
                }
            };
        }

        if config.region().is_none() {
            diagnostics.push(ProviderDiagnostic::error(
                "No region resolved",
                "The region could not be determined from the configuration, environment or shared config files.",
            ));
            return ProviderResolution::failed(diagnostics);
        }

        let sts_endpoint = request.sts_endpoint.as_deref().filter(|e| !e.is_empty());
        if request.skip_credentials_validation {
            if let (Some(endpoint), None) = (sts_endpoint, &request.assume_role) {
                diagnostics.push(ProviderDiagnostic::warning(
                    "STS endpoint override not used",
                    format!(
                        "The STS endpoint {:?} is only contacted to validate credentials or assume a role.",
                        endpoint
                    ),
                ));
            }
        } else if let Err(reason) = Self::validate_credentials(&config, sts_endpoint).await {
            tracing::warn!(error = %reason, "Credential validation failed");
            diagnostics.push(ProviderDiagnostic::error(
                "No valid credential sources found",
                format!(
                    "Please see {} for more information about providing credentials.\n\nError: {}",
                    request.caller_documentation_url, reason
                ),
            ));
            return ProviderResolution::failed(diagnostics);
        }

        tracing::debug!(
            region = ?config.region().map(|r| r.as_ref().to_string()),
            user_agent = %request.user_agent_string(),
            "Resolved AWS client configuration"
        );

        ProviderResolution {
            config: Some(config),
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_maps_one_to_one() {
        assert_eq!(Severity::from(ProviderSeverity::Error), Severity::Error);
        assert_eq!(Severity::from(ProviderSeverity::Warning), Severity::Warning);
    }

    #[test]
    fn test_provider_diagnostic_is_sourceless() {
        let diag: Diagnostic = ProviderDiagnostic::warning("heads up", "detail").into();
        assert_eq!(diag.severity, Severity::Warning);
        assert!(diag.path.is_none());
        assert_eq!(diag.summary, "heads up");
    }

    use crate::auth::UserAgentProduct;

    /// Static credentials in eu-west-1, validation skipped
    fn static_request() -> AuthRequest {
        AuthRequest {
            access_key: Some("AKIAEXAMPLE".to_string()),
            secret_key: Some("secret".to_string()),
            token: None,
            profile: None,
            region: Some("eu-west-1".to_string()),
            caller_name: "S3 Backend".to_string(),
            caller_documentation_url: String::new(),
            user_agent: Vec::new(),
            max_retries: 2,
            skip_credentials_validation: true,
            metadata_service: Some(MetadataServiceState::Disabled),
            iam_endpoint: None,
            sts_endpoint: None,
            shared_credentials_files: Vec::new(),
            shared_config_files: Vec::new(),
            assume_role: None,
        }
    }

    #[test]
    fn test_app_name_from_caller_name() {
        assert_eq!(app_name_token(&static_request()), "S3-Backend");
    }

    #[test]
    fn test_app_name_from_user_agent() {
        let mut request = static_request();
        request.user_agent = vec![
            UserAgentProduct::new("APN", "1.0"),
            UserAgentProduct::new("s3-state-backend", "0.1.0"),
        ];
        let token = app_name_token(&request);
        assert_eq!(token, "APN-1.0-s3-state-backend-0.1.0");
        assert!(AppName::new(token).is_ok());
    }

    #[test]
    fn test_no_profile_files_without_paths() {
        assert!(SdkAuthProvider::profile_files(&static_request()).is_none());
    }

    #[tokio::test]
    async fn test_static_credentials_resolve_offline() {
        let resolution = SdkAuthProvider::new().resolve(&static_request()).await;
        assert!(resolution.diagnostics.is_empty());

        let config = resolution.config.unwrap();
        assert_eq!(config.region().unwrap().as_ref(), "eu-west-1");
        assert_eq!(config.retry_config().unwrap().max_attempts(), 3);
    }

    #[tokio::test]
    async fn test_max_retries_at_upper_bound_saturates() {
        let mut request = static_request();
        request.max_retries = u32::MAX;

        let resolution = SdkAuthProvider::new().resolve(&request).await;
        let config = resolution.config.unwrap();
        assert_eq!(config.retry_config().unwrap().max_attempts(), u32::MAX);
    }

    #[tokio::test]
    async fn test_unreachable_sts_fails_credential_validation() {
        let mut request = static_request();
        request.skip_credentials_validation = false;
        request.max_retries = 0;
        request.sts_endpoint = Some("http://127.0.0.1:1".to_string());

        let resolution = SdkAuthProvider::new().resolve(&request).await;
        assert!(resolution.config.is_none());
        assert_eq!(resolution.diagnostics.len(), 1);
        assert_eq!(resolution.diagnostics[0].severity, ProviderSeverity::Error);
        assert_eq!(resolution.diagnostics[0].summary, "No valid credential sources found");
    }

    #[tokio::test]
    async fn test_unused_sts_endpoint_warns() {
        let mut request = static_request();
        request.sts_endpoint = Some("http://127.0.0.1:1".to_string());

        let resolution = SdkAuthProvider::new().resolve(&request).await;
        assert!(resolution.config.is_some());
        assert_eq!(resolution.diagnostics.len(), 1);
        assert_eq!(resolution.diagnostics[0].severity, ProviderSeverity::Warning);
    }
}

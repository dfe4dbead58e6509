//! S3 remote-state backend
//!
//! The host uses the backend in three steps: describe the accepted attributes
//! with [`S3Backend::schema`], check a configuration with
//! [`S3Backend::validate`], then resolve it into live clients with
//! [`S3Backend::configure`].

use std::sync::Arc;

use crate::auth::{AuthProvider, SdkAuthProvider};
use crate::config::aws::{create_dynamodb_client, create_s3_client};
use crate::config::{
    self, region, resolve, schema, ConfigSchema, EnvLookup, ProcessEnv, RawConfig,
};
use crate::diagnostics::{AttributePath, Diagnostics};
use crate::error::BackendError;
use crate::state::ResolvedBackendState;

/// Backend storing state in S3 with optional DynamoDB locking
pub struct S3Backend {
    env: Arc<dyn EnvLookup>,
    auth: Arc<dyn AuthProvider>,
    state: Option<ResolvedBackendState>,
}

impl Default for S3Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl S3Backend {
    /// Backend reading the process environment and resolving credentials
    /// through the AWS SDK
    pub fn new() -> Self {
        Self::with_providers(Arc::new(ProcessEnv), Arc::new(SdkAuthProvider::new()))
    }

    /// Backend with explicit environment and authentication providers
    pub fn with_providers(env: Arc<dyn EnvLookup>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            env,
            auth,
            state: None,
        }
    }

    /// Attributes accepted by this backend
    pub fn schema(&self) -> ConfigSchema {
        schema()
    }

    /// Check a configuration without side effects
    pub fn validate(&self, raw: RawConfig) -> (RawConfig, Diagnostics) {
        config::validate(raw, self.env.as_ref())
    }

    /// Resolved state, if [`configure`](Self::configure) has succeeded
    pub fn state(&self) -> Option<&ResolvedBackendState> {
        self.state.as_ref()
    }

    pub fn try_state(&self) -> Result<&ResolvedBackendState, BackendError> {
        self.state.as_ref().ok_or(BackendError::NotConfigured)
    }

    pub fn is_configured(&self) -> bool {
        self.state.is_some()
    }

    /// Resolve a validated configuration into service clients
    ///
    /// The resolved state is assigned only when no error was reported. A failed
    /// call leaves the backend as it was.
    pub async fn configure(&mut self, raw: &RawConfig) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let env = self.env.as_ref();

        if let Some(region) = raw.region.as_deref().filter(|r| !r.is_empty()) {
            if !raw.skip_region_validation() {
                if let Err(e) = region::validate_region(region) {
                    diags.error(
                        "Invalid region value",
                        e.to_string(),
                        AttributePath::attr("region"),
                    );
                    return diags;
                }
            }
        }

        let bucket = raw.bucket.clone().unwrap_or_default();
        let key = raw.key.clone().unwrap_or_default();
        let workspace_key_prefix = resolve::workspace_key_prefix(raw);
        let customer_encryption_key = resolve::customer_key(raw, env, &mut diags);

        let request = resolve::auth_request(raw, env, &mut diags);
        tracing::debug!(request = ?request, "Resolving AWS credentials");

        let resolution = self.auth.resolve(&request).await;
        for diagnostic in resolution.diagnostics {
            diags.push(diagnostic.into());
        }
        if diags.has_errors() {
            return diags;
        }
        let Some(sdk_config) = resolution.config else {
            diags.sourceless_error(
                "Failed to configure AWS client",
                "The authentication provider returned no client configuration.",
            );
            return diags;
        };

        // An empty endpoint attribute suppresses the environment but is not
        // itself a usable URL.
        let dynamodb_endpoint = resolve::dynamodb_endpoint(raw, env);
        let dynamodb_client = create_dynamodb_client(
            &sdk_config,
            dynamodb_endpoint.as_deref().filter(|e| !e.is_empty()),
        );

        let s3_endpoint = resolve::s3_endpoint(raw, env);
        let s3_client = create_s3_client(
            &sdk_config,
            s3_endpoint.as_deref().filter(|e| !e.is_empty()),
            raw.force_path_style,
        );

        let state = ResolvedBackendState {
            bucket,
            key,
            workspace_key_prefix,
            server_side_encryption: raw.encrypt.unwrap_or(false),
            kms_key_id: raw.kms_key_id.clone(),
            customer_encryption_key,
            acl: raw.acl.clone(),
            dynamodb_table: raw.dynamodb_table.clone(),
            s3_endpoint,
            dynamodb_endpoint,
            force_path_style: raw.force_path_style,
            s3_client,
            dynamodb_client,
        };

        tracing::info!(
            bucket = %state.bucket,
            key = %state.key,
            locking = state.locking_enabled(),
            encrypt = state.server_side_encryption,
            "Configured S3 backend"
        );

        self.state = Some(state);
        diags
    }
}

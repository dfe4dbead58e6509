//! Resolved backend state
//!
//! Built once by [`S3Backend::configure`](crate::S3Backend::configure) and
//! read by the state storage and locking operations.

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;

use crate::config::CustomerKey;

/// Name of the workspace stored directly under `key`
pub const DEFAULT_WORKSPACE: &str = "default";

/// Fully resolved backend configuration plus live service clients
#[derive(Debug, Clone)]
pub struct ResolvedBackendState {
    pub(crate) bucket: String,
    pub(crate) key: String,
    pub(crate) workspace_key_prefix: String,
    pub(crate) server_side_encryption: bool,
    pub(crate) kms_key_id: Option<String>,
    pub(crate) customer_encryption_key: Option<CustomerKey>,
    pub(crate) acl: Option<String>,
    pub(crate) dynamodb_table: Option<String>,

    pub(crate) s3_endpoint: Option<String>,
    pub(crate) dynamodb_endpoint: Option<String>,
    pub(crate) force_path_style: Option<bool>,

    pub(crate) s3_client: S3Client,
    pub(crate) dynamodb_client: DynamoDbClient,
}

impl ResolvedBackendState {
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn workspace_key_prefix(&self) -> &str {
        &self.workspace_key_prefix
    }

    pub fn server_side_encryption(&self) -> bool {
        self.server_side_encryption
    }

    /// KMS key for SSE-KMS; `None` when unset or empty
    pub fn kms_key_id(&self) -> Option<&str> {
        self.kms_key_id.as_deref().filter(|v| !v.is_empty())
    }

    /// SSE-C key, exactly 32 bytes
    pub fn customer_encryption_key(&self) -> Option<&CustomerKey> {
        self.customer_encryption_key.as_ref()
    }

    pub fn acl(&self) -> Option<&str> {
        self.acl.as_deref().filter(|v| !v.is_empty())
    }

    /// Lock table; locking is disabled without one
    pub fn dynamodb_table(&self) -> Option<&str> {
        self.dynamodb_table.as_deref().filter(|v| !v.is_empty())
    }

    pub fn locking_enabled(&self) -> bool {
        self.dynamodb_table().is_some()
    }

    /// Endpoint override applied to the S3 client
    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    /// Endpoint override applied to the DynamoDB client
    pub fn dynamodb_endpoint(&self) -> Option<&str> {
        self.dynamodb_endpoint.as_deref()
    }

    pub fn force_path_style(&self) -> Option<bool> {
        self.force_path_style
    }

    pub fn s3_client(&self) -> &S3Client {
        &self.s3_client
    }

    pub fn dynamodb_client(&self) -> &DynamoDbClient {
        &self.dynamodb_client
    }

    /// Object key holding the state of `workspace`
    ///
    /// The default workspace lives at `key`; others at
    /// `<workspace_key_prefix>/<workspace>/<key>`.
    pub fn state_key(&self, workspace: &str) -> String {
        if workspace == DEFAULT_WORKSPACE {
            return self.key.clone();
        }
        format!("{}/{}/{}", self.workspace_key_prefix, workspace, self.key)
    }
}

//! Typed backend configuration
//!
//! One field per attribute declared in [`schema`](super::schema::schema).
//! Absent and `null` attributes are `None`; an empty string is `Some("")`,
//! which matters for precedence: an explicit attribute always wins over the
//! environment, even when empty.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::BackendError;

/// The nested `endpoints` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointsBlock {
    pub dynamodb: Option<String>,
    pub iam: Option<String>,
    pub s3: Option<String>,
    pub sts: Option<String>,
}

/// Value of `assume_role_duration_seconds`
///
/// Declared as a number, but duration expressions such as `"1h"` are also
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Expression(String),
}

/// Raw backend configuration as written by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub region: Option<String>,

    pub endpoint: Option<String>,
    pub dynamodb_endpoint: Option<String>,
    pub iam_endpoint: Option<String>,
    pub sts_endpoint: Option<String>,
    pub endpoints: Option<EndpointsBlock>,

    pub encrypt: Option<bool>,
    pub acl: Option<String>,
    #[serde(skip_serializing)]
    pub access_key: Option<String>,
    #[serde(skip_serializing)]
    pub secret_key: Option<String>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub kms_key_id: Option<String>,
    pub dynamodb_table: Option<String>,
    pub profile: Option<String>,
    pub shared_credentials_file: Option<String>,
    pub shared_credentials_files: Option<BTreeSet<String>>,
    pub shared_config_files: Option<BTreeSet<String>>,
    pub skip_credentials_validation: Option<bool>,
    pub skip_metadata_api_check: Option<bool>,
    pub skip_region_validation: Option<bool>,
    #[serde(skip_serializing)]
    pub sse_customer_key: Option<String>,

    pub role_arn: Option<String>,
    pub session_name: Option<String>,
    pub external_id: Option<String>,
    pub assume_role_duration_seconds: Option<DurationValue>,
    pub assume_role_policy: Option<String>,
    pub assume_role_policy_arns: Option<BTreeSet<String>>,
    pub assume_role_tags: Option<BTreeMap<String, String>>,
    pub assume_role_transitive_tag_keys: Option<BTreeSet<String>>,

    pub workspace_key_prefix: Option<String>,
    pub force_path_style: Option<bool>,
    pub max_retries: Option<u32>,
}

impl RawConfig {
    /// Parse a configuration from a JSON value
    ///
    /// Unknown attributes and values of the wrong kind are rejected here, before
    /// any semantic validation runs.
    pub fn from_value(value: serde_json::Value) -> Result<Self, BackendError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, BackendError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| BackendError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// `endpoints.dynamodb`
    pub fn nested_dynamodb_endpoint(&self) -> Option<&str> {
        self.endpoints.as_ref().and_then(|e| e.dynamodb.as_deref())
    }

    /// `endpoints.iam`
    pub fn nested_iam_endpoint(&self) -> Option<&str> {
        self.endpoints.as_ref().and_then(|e| e.iam.as_deref())
    }

    /// `endpoints.s3`
    pub fn nested_s3_endpoint(&self) -> Option<&str> {
        self.endpoints.as_ref().and_then(|e| e.s3.as_deref())
    }

    /// `endpoints.sts`
    pub fn nested_sts_endpoint(&self) -> Option<&str> {
        self.endpoints.as_ref().and_then(|e| e.sts.as_deref())
    }

    pub fn skip_region_validation(&self) -> bool {
        self.skip_region_validation.unwrap_or(false)
    }

    pub fn skip_credentials_validation(&self) -> bool {
        self.skip_credentials_validation.unwrap_or(false)
    }
}

/// True if an optional string attribute is absent or empty
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

//! Backend configuration schema
//!
//! Declares every attribute the backend accepts, its value kind, and whether
//! it is required or sensitive. The schema is static; the typed
//! [`RawConfig`](super::RawConfig) mirrors it field for field.

use serde::Serialize;
use std::collections::BTreeMap;

/// Kind of value an attribute holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Bool,
    Number,
    StringSet,
    StringMap,
}

/// How a nested object is repeated. Only singleton blocks are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Nesting {
    Single,
}

/// A nested object attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedObject {
    pub nesting: Nesting,
    pub attributes: BTreeMap<&'static str, Attribute>,
}

/// Declaration of a single attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    /// `None` for attributes that only carry a nested object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ValueKind>,
    pub required: bool,
    pub sensitive: bool,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<NestedObject>,
}

impl Attribute {
    fn optional(kind: ValueKind, description: &'static str) -> Self {
        Self {
            kind: Some(kind),
            required: false,
            sensitive: false,
            description,
            nested: None,
        }
    }

    fn required(kind: ValueKind, description: &'static str) -> Self {
        Self {
            required: true,
            ..Self::optional(kind, description)
        }
    }

    fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    fn nested(attributes: BTreeMap<&'static str, Attribute>, description: &'static str) -> Self {
        Self {
            kind: None,
            required: false,
            sensitive: false,
            description,
            nested: Some(NestedObject {
                nesting: Nesting::Single,
                attributes,
            }),
        }
    }
}

/// The full set of recognized configuration attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSchema {
    pub attributes: BTreeMap<&'static str, Attribute>,
}

impl ConfigSchema {
    /// Look up a top-level attribute
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Look up an attribute inside a nested object
    pub fn nested_attribute(&self, block: &str, name: &str) -> Option<&Attribute> {
        self.attributes
            .get(block)
            .and_then(|a| a.nested.as_ref())
            .and_then(|n| n.attributes.get(name))
    }

    /// Names of all required top-level attributes
    pub fn required_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes
            .iter()
            .filter(|(_, a)| a.required)
            .map(|(name, _)| *name)
    }

    /// Names of all sensitive attributes, which must never be logged
    pub fn sensitive_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes
            .iter()
            .filter(|(_, a)| a.sensitive)
            .map(|(name, _)| *name)
    }
}

/// Build the backend configuration schema
pub fn schema() -> ConfigSchema {
    use ValueKind::*;

    let endpoints = BTreeMap::from([
        (
            "dynamodb",
            Attribute::optional(String, "A custom endpoint for the DynamoDB API"),
        ),
        (
            "iam",
            Attribute::optional(String, "A custom endpoint for the IAM API"),
        ),
        (
            "s3",
            Attribute::optional(String, "A custom endpoint for the S3 API"),
        ),
        (
            "sts",
            Attribute::optional(String, "A custom endpoint for the STS API"),
        ),
    ]);

    let attributes = BTreeMap::from([
        ("bucket", Attribute::required(String, "The name of the S3 bucket")),
        (
            "key",
            Attribute::required(String, "The path to the state file inside the bucket"),
        ),
        (
            "region",
            Attribute::optional(
                String,
                "AWS region of the S3 Bucket and DynamoDB Table (if used).",
            ),
        ),
        (
            "dynamodb_endpoint",
            Attribute::optional(String, "A custom endpoint for the DynamoDB API"),
        ),
        (
            "endpoint",
            Attribute::optional(String, "A custom endpoint for the S3 API"),
        ),
        (
            "iam_endpoint",
            Attribute::optional(String, "A custom endpoint for the IAM API"),
        ),
        (
            "sts_endpoint",
            Attribute::optional(String, "A custom endpoint for the STS API"),
        ),
        (
            "endpoints",
            Attribute::nested(endpoints, "Custom endpoints for the AWS APIs"),
        ),
        (
            "encrypt",
            Attribute::optional(
                Bool,
                "Whether to enable server side encryption of the state file",
            ),
        ),
        (
            "acl",
            Attribute::optional(String, "Canned ACL to be applied to the state file"),
        ),
        (
            "access_key",
            Attribute::optional(String, "AWS access key").sensitive(),
        ),
        (
            "secret_key",
            Attribute::optional(String, "AWS secret key").sensitive(),
        ),
        ("token", Attribute::optional(String, "MFA token").sensitive()),
        (
            "kms_key_id",
            Attribute::optional(
                String,
                "The ARN of a KMS Key to use for encrypting the state",
            ),
        ),
        (
            "dynamodb_table",
            Attribute::optional(String, "DynamoDB table for state locking and consistency"),
        ),
        ("profile", Attribute::optional(String, "AWS profile name")),
        (
            "shared_credentials_file",
            Attribute::optional(String, "Path to a shared credentials file"),
        ),
        (
            "shared_credentials_files",
            Attribute::optional(StringSet, "Paths to shared credentials files"),
        ),
        (
            "shared_config_files",
            Attribute::optional(StringSet, "Paths to shared config files"),
        ),
        (
            "skip_credentials_validation",
            Attribute::optional(Bool, "Skip the credentials validation via STS API."),
        ),
        (
            "skip_metadata_api_check",
            Attribute::optional(Bool, "Skip the AWS Metadata API check."),
        ),
        (
            "skip_region_validation",
            Attribute::optional(Bool, "Skip static validation of region name."),
        ),
        (
            "sse_customer_key",
            Attribute::optional(
                String,
                "The base64-encoded encryption key to use for server-side encryption with customer-provided keys (SSE-C).",
            )
            .sensitive(),
        ),
        ("role_arn", Attribute::optional(String, "The role to be assumed")),
        (
            "session_name",
            Attribute::optional(String, "The session name to use when assuming the role."),
        ),
        (
            "external_id",
            Attribute::optional(String, "The external ID to use when assuming the role"),
        ),
        (
            "assume_role_duration_seconds",
            Attribute::optional(
                Number,
                "Seconds to restrict the assume role session duration.",
            ),
        ),
        (
            "assume_role_policy",
            Attribute::optional(
                String,
                "IAM Policy JSON describing further restricting permissions for the IAM Role being assumed.",
            ),
        ),
        (
            "assume_role_policy_arns",
            Attribute::optional(
                StringSet,
                "Amazon Resource Names (ARNs) of IAM Policies describing further restricting permissions for the IAM Role being assumed.",
            ),
        ),
        (
            "assume_role_tags",
            Attribute::optional(StringMap, "Assume role session tags."),
        ),
        (
            "assume_role_transitive_tag_keys",
            Attribute::optional(
                StringSet,
                "Assume role session tag keys to pass to any subsequent sessions.",
            ),
        ),
        (
            "workspace_key_prefix",
            Attribute::optional(
                String,
                "The prefix applied to the non-default state path inside the bucket.",
            ),
        ),
        (
            "force_path_style",
            Attribute::optional(Bool, "Force s3 to use path style api."),
        ),
        (
            "max_retries",
            Attribute::optional(
                Number,
                "The maximum number of times an AWS API request is retried on retryable failure.",
            ),
        ),
    ]);

    ConfigSchema { attributes }
}

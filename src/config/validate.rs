//! Semantic validation of the backend configuration
//!
//! Runs after the structure has been checked against the schema. Every rule is
//! evaluated independently so one call reports every problem.

use super::env::{EnvLookup, ENV_DEFAULT_REGION, ENV_REGION, ENV_SSE_CUSTOMER_KEY};
use super::kms::validate_kms_key;
use super::raw::{is_blank, RawConfig};
use super::resolve::assume_role_duration;
use crate::diagnostics::{AttributePath, Diagnostics};

const ENCRYPTION_KEY_CONFLICT: &str = r#"Only one of "kms_key_id" and "sse_customer_key" can be set.

The "kms_key_id" is used for encryption with KMS-Managed Keys (SSE-KMS)
while "sse_customer_key" is used for encryption with customer-managed keys (SSE-C).
Please choose one or the other."#;

const ENCRYPTION_KEY_CONFLICT_ENV_VAR: &str = r#"Only one of "kms_key_id" and the environment variable "AWS_SSE_CUSTOMER_KEY" can be set.

The "kms_key_id" is used for encryption with KMS-Managed Keys (SSE-KMS)
while "AWS_SSE_CUSTOMER_KEY" is used for encryption with customer-managed keys (SSE-C).
Please choose one or the other."#;

fn has_slash_at_edge(value: &str) -> bool {
    value.starts_with('/') || value.ends_with('/')
}

/// Validate a configuration
///
/// Returns the configuration unchanged together with every finding.
pub fn validate(raw: RawConfig, env: &dyn EnvLookup) -> (RawConfig, Diagnostics) {
    let mut diags = Diagnostics::new();

    validate_bucket(&raw, &mut diags);
    validate_key(&raw, &mut diags);
    validate_region(&raw, env, &mut diags);
    validate_encryption(&raw, env, &mut diags);
    validate_workspace_key_prefix(&raw, &mut diags);
    validate_assume_role_duration(&raw, &mut diags);

    if diags.has_errors() {
        tracing::debug!(errors = diags.errors().count(), "Backend configuration is invalid");
    }

    (raw, diags)
}

fn validate_bucket(raw: &RawConfig, diags: &mut Diagnostics) {
    if is_blank(raw.bucket.as_deref()) {
        diags.error(
            "Invalid bucket value",
            r#"The "bucket" attribute value must not be empty."#,
            AttributePath::attr("bucket"),
        );
    }
}

fn validate_key(raw: &RawConfig, diags: &mut Diagnostics) {
    match raw.key.as_deref() {
        None | Some("") => diags.error(
            "Invalid key value",
            r#"The "key" attribute value must not be empty."#,
            AttributePath::attr("key"),
        ),
        // S3 strips a leading slash, which breaks the workspace hierarchy, and
        // treats a trailing slash as a directory marker.
        Some(key) if has_slash_at_edge(key) => diags.error(
            "Invalid key value",
            r#"The "key" attribute value must not start or end with "/"."#,
            AttributePath::attr("key"),
        ),
        Some(_) => {}
    }
}

fn validate_region(raw: &RawConfig, env: &dyn EnvLookup, diags: &mut Diagnostics) {
    if is_blank(raw.region.as_deref())
        && env.first_non_empty(&[ENV_REGION, ENV_DEFAULT_REGION]).is_none()
    {
        diags.error(
            "Missing region value",
            format!(
                r#"The "region" attribute or the "{}" or "{}" environment variables must be set."#,
                ENV_REGION, ENV_DEFAULT_REGION
            ),
            AttributePath::attr("region"),
        );
    }
}

fn validate_encryption(raw: &RawConfig, env: &dyn EnvLookup, diags: &mut Diagnostics) {
    let Some(kms_key_id) = raw.kms_key_id.as_deref().filter(|v| !v.is_empty()) else {
        return;
    };

    if !is_blank(raw.sse_customer_key.as_deref()) {
        diags.error(
            "Invalid encryption configuration",
            ENCRYPTION_KEY_CONFLICT,
            AttributePath::root(),
        );
    } else if env.non_empty(ENV_SSE_CUSTOMER_KEY).is_some() {
        diags.error(
            "Invalid encryption configuration",
            ENCRYPTION_KEY_CONFLICT_ENV_VAR,
            AttributePath::root(),
        );
    }

    diags.extend(validate_kms_key(
        AttributePath::attr("kms_key_id"),
        kms_key_id,
    ));
}

fn validate_workspace_key_prefix(raw: &RawConfig, diags: &mut Diagnostics) {
    if raw
        .workspace_key_prefix
        .as_deref()
        .is_some_and(has_slash_at_edge)
    {
        diags.error(
            "Invalid workspace_key_prefix value",
            r#"The "workspace_key_prefix" attribute value must not start or end with "/"."#,
            AttributePath::attr("workspace_key_prefix"),
        );
    }
}

fn validate_assume_role_duration(raw: &RawConfig, diags: &mut Diagnostics) {
    let Some(value) = &raw.assume_role_duration_seconds else {
        return;
    };
    if assume_role_duration(value).is_none() {
        diags.error(
            "Invalid assume_role_duration_seconds value",
            r#"The "assume_role_duration_seconds" value must be a number of seconds or a duration such as "1h"."#,
            AttributePath::attr("assume_role_duration_seconds"),
        );
    }
}

//! Value resolution
//!
//! Settings are resolved by walking a fixed precedence chain: nested block
//! attribute, flat attribute, environment variable, then default. An attribute
//! that is present wins even when empty; an environment variable only counts
//! when non-empty.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::time::Duration;

use super::env::{
    EnvLookup, ENV_DYNAMODB_ENDPOINT, ENV_IAM_ENDPOINT, ENV_S3_ENDPOINT, ENV_SSE_CUSTOMER_KEY,
    ENV_STS_ENDPOINT,
};
use super::raw::{DurationValue, RawConfig};
use crate::auth::{AssumeRoleRequest, AuthRequest, MetadataServiceState, UserAgentProduct};
use crate::diagnostics::{AttributePath, Diagnostics};

/// Workspace key prefix used when `workspace_key_prefix` is absent
pub const DEFAULT_WORKSPACE_KEY_PREFIX: &str = "env:";

/// Retry count used when `max_retries` is absent
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Length of a base64-encoded (padded) 32-byte key
pub const CUSTOMER_KEY_ENCODED_LEN: usize = 44;

/// Length of a decoded SSE-C key
pub const CUSTOMER_KEY_LEN: usize = 32;

pub const CALLER_NAME: &str = "S3 Backend";
pub const CALLER_DOCUMENTATION_URL: &str = "https://docs.rs/s3-state-backend";

/// First candidate that is present, in order
pub fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates.iter().find_map(|c| *c)
}

/// Attribute value if present, else the first non-empty environment variable
pub fn attr_or_env(attr: Option<&str>, env: &dyn EnvLookup, names: &[&str]) -> Option<String> {
    match attr {
        Some(value) => Some(value.to_string()),
        None => env.first_non_empty(names),
    }
}

/// Endpoint for the DynamoDB lock table client
///
/// `endpoints.dynamodb`, then `dynamodb_endpoint`, then `AWS_DYNAMODB_ENDPOINT`.
pub fn dynamodb_endpoint(raw: &RawConfig, env: &dyn EnvLookup) -> Option<String> {
    let attr = first_present(&[
        raw.nested_dynamodb_endpoint(),
        raw.dynamodb_endpoint.as_deref(),
    ]);
    attr_or_env(attr, env, &[ENV_DYNAMODB_ENDPOINT])
}

/// Endpoint for the S3 client
///
/// `endpoints.s3`, then `endpoint`, then `AWS_S3_ENDPOINT`.
pub fn s3_endpoint(raw: &RawConfig, env: &dyn EnvLookup) -> Option<String> {
    let attr = first_present(&[raw.nested_s3_endpoint(), raw.endpoint.as_deref()]);
    attr_or_env(attr, env, &[ENV_S3_ENDPOINT])
}

/// `endpoints.iam`, then `iam_endpoint`, then `AWS_IAM_ENDPOINT`.
pub fn iam_endpoint(raw: &RawConfig, env: &dyn EnvLookup) -> Option<String> {
    let attr = first_present(&[raw.nested_iam_endpoint(), raw.iam_endpoint.as_deref()]);
    attr_or_env(attr, env, &[ENV_IAM_ENDPOINT])
}

/// `endpoints.sts`, then `sts_endpoint`, then `AWS_STS_ENDPOINT`.
pub fn sts_endpoint(raw: &RawConfig, env: &dyn EnvLookup) -> Option<String> {
    let attr = first_present(&[raw.nested_sts_endpoint(), raw.sts_endpoint.as_deref()]);
    attr_or_env(attr, env, &[ENV_STS_ENDPOINT])
}

/// Workspace key prefix, defaulting only when the attribute is absent
pub fn workspace_key_prefix(raw: &RawConfig) -> String {
    raw.workspace_key_prefix
        .clone()
        .unwrap_or_else(|| DEFAULT_WORKSPACE_KEY_PREFIX.to_string())
}

/// A decoded SSE-C customer key
#[derive(Clone, PartialEq, Eq)]
pub struct CustomerKey([u8; CUSTOMER_KEY_LEN]);

impl CustomerKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The key re-encoded as base64, as sent in SSE-C request headers
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }
}

impl fmt::Debug for CustomerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomerKey(** redacted **)")
    }
}

/// Where a customer key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerKeySource {
    Attribute,
    Environment,
}

impl CustomerKeySource {
    fn summary(self) -> String {
        match self {
            CustomerKeySource::Attribute => "Invalid sse_customer_key value".to_string(),
            CustomerKeySource::Environment => format!("Invalid {} value", ENV_SSE_CUSTOMER_KEY),
        }
    }

    fn subject(self) -> String {
        match self {
            CustomerKeySource::Attribute => "sse_customer_key".to_string(),
            CustomerKeySource::Environment => {
                format!("The environment variable {:?}", ENV_SSE_CUSTOMER_KEY)
            }
        }
    }

    fn report(self, diags: &mut Diagnostics, detail: String) {
        match self {
            CustomerKeySource::Attribute => diags.error(
                self.summary(),
                detail,
                AttributePath::attr("sse_customer_key"),
            ),
            CustomerKeySource::Environment => diags.sourceless_error(self.summary(), detail),
        }
    }
}

/// Resolve the SSE-C key: attribute, then `AWS_SSE_CUSTOMER_KEY`, then unset
///
/// Problems are appended to `diags`, naming the source the value came from.
pub fn customer_key(
    raw: &RawConfig,
    env: &dyn EnvLookup,
    diags: &mut Diagnostics,
) -> Option<CustomerKey> {
    let (encoded, source) = match raw.sse_customer_key.as_deref() {
        Some(value) => (value.to_string(), CustomerKeySource::Attribute),
        None => (
            env.non_empty(ENV_SSE_CUSTOMER_KEY)?,
            CustomerKeySource::Environment,
        ),
    };
    decode_customer_key(&encoded, source, diags)
}

fn decode_customer_key(
    encoded: &str,
    source: CustomerKeySource,
    diags: &mut Diagnostics,
) -> Option<CustomerKey> {
    if encoded.len() != CUSTOMER_KEY_ENCODED_LEN {
        source.report(
            diags,
            format!(
                "{} must be {} characters in length",
                source.subject(),
                CUSTOMER_KEY_ENCODED_LEN
            ),
        );
        return None;
    }

    let decoded = match STANDARD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            source.report(
                diags,
                format!("{} must be base64 encoded: {}", source.subject(), e),
            );
            return None;
        }
    };

    match <[u8; CUSTOMER_KEY_LEN]>::try_from(decoded.as_slice()) {
        Ok(key) => Some(CustomerKey(key)),
        Err(_) => {
            source.report(
                diags,
                format!(
                    "{} must decode to a {}-byte key, got {} bytes",
                    source.subject(),
                    CUSTOMER_KEY_LEN,
                    decoded.len()
                ),
            );
            None
        }
    }
}

/// Parse a duration expression such as `"1h"`, `"15m"`, `"1h30m"` or `"1.5h"`
///
/// A bare integer is taken as seconds. Units: `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(secs) = s.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut total = 0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest.find(|c: char| !is_number(c)).unwrap_or(rest.len());
        if number_len == 0 {
            return None;
        }
        let value: f64 = rest[..number_len].parse().ok()?;
        rest = &rest[number_len..];

        let unit_len = rest.find(is_number).unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            _ => return None,
        };
        total += value * scale;
        rest = &rest[unit_len..];
    }

    Duration::try_from_secs_f64(total).ok()
}

/// Resolve `assume_role_duration_seconds`
pub fn assume_role_duration(value: &DurationValue) -> Option<Duration> {
    match value {
        DurationValue::Seconds(secs) => Some(Duration::from_secs(*secs)),
        DurationValue::Expression(expr) => parse_duration(expr),
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Build the assume-role request; only called when `role_arn` is set
fn assume_role_request(raw: &RawConfig, diags: &mut Diagnostics) -> AssumeRoleRequest {
    let duration = raw.assume_role_duration_seconds.as_ref().and_then(|value| {
        let duration = assume_role_duration(value);
        if duration.is_none() {
            diags.error(
                "Invalid assume_role_duration_seconds value",
                format!(
                    "The assume_role_duration_seconds value {:?} is not a number of seconds or a duration such as \"1h\".",
                    value
                ),
                AttributePath::attr("assume_role_duration_seconds"),
            );
        }
        duration
    });

    AssumeRoleRequest {
        role_arn: raw.role_arn.clone().unwrap_or_default(),
        duration,
        external_id: raw.external_id.clone(),
        policy: raw.assume_role_policy.clone(),
        session_name: raw.session_name.clone(),
        policy_arns: raw
            .assume_role_policy_arns
            .iter()
            .flatten()
            .cloned()
            .collect(),
        tags: raw.assume_role_tags.clone().unwrap_or_default(),
        transitive_tag_keys: raw
            .assume_role_transitive_tag_keys
            .iter()
            .flatten()
            .cloned()
            .collect(),
    }
}

/// User agent products sent with every request
pub fn user_agent() -> Vec<UserAgentProduct> {
    vec![
        UserAgentProduct::new("APN", "1.0"),
        UserAgentProduct::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
    ]
}

/// Assemble the request handed to the authentication provider
pub fn auth_request(raw: &RawConfig, env: &dyn EnvLookup, diags: &mut Diagnostics) -> AuthRequest {
    let metadata_service = raw.skip_metadata_api_check.map(|skip| {
        if skip {
            MetadataServiceState::Disabled
        } else {
            MetadataServiceState::Enabled
        }
    });

    let shared_credentials_files = raw
        .shared_credentials_file
        .iter()
        .chain(raw.shared_credentials_files.iter().flatten())
        .cloned()
        .collect();

    let shared_config_files = raw.shared_config_files.iter().flatten().cloned().collect();

    let assume_role = raw
        .role_arn
        .is_some()
        .then(|| assume_role_request(raw, diags));

    AuthRequest {
        access_key: raw.access_key.clone(),
        secret_key: raw.secret_key.clone(),
        token: raw.token.clone(),
        profile: non_blank(raw.profile.as_ref()),
        region: non_blank(raw.region.as_ref()),
        caller_name: CALLER_NAME.to_string(),
        caller_documentation_url: CALLER_DOCUMENTATION_URL.to_string(),
        user_agent: user_agent(),
        max_retries: raw.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        skip_credentials_validation: raw.skip_credentials_validation(),
        metadata_service,
        iam_endpoint: iam_endpoint(raw, env),
        sts_endpoint: sts_endpoint(raw, env),
        shared_credentials_files,
        shared_config_files,
        assume_role,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::EnvSnapshot;
    use std::collections::{BTreeMap, BTreeSet};

    const VALID_KEY: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";

    fn raw() -> RawConfig {
        RawConfig {
            bucket: Some("b".to_string()),
            key: Some("k".to_string()),
            region: Some("us-east-1".to_string()),
            ..RawConfig::default()
        }
    }

    #[test]
    fn test_s3_endpoint_attribute_beats_env() {
        let env = EnvSnapshot::new().with(ENV_S3_ENDPOINT, "http://env:9000");
        let mut config = raw();
        assert_eq!(s3_endpoint(&config, &env).as_deref(), Some("http://env:9000"));

        config.endpoint = Some("http://attr:9000".to_string());
        assert_eq!(s3_endpoint(&config, &env).as_deref(), Some("http://attr:9000"));

        config.endpoints = Some(crate::config::EndpointsBlock {
            s3: Some("http://nested:9000".to_string()),
            ..Default::default()
        });
        assert_eq!(s3_endpoint(&config, &env).as_deref(), Some("http://nested:9000"));
    }

    #[test]
    fn test_dynamodb_endpoint_full_chain() {
        let mut config = raw();
        let empty = EnvSnapshot::new();
        assert_eq!(dynamodb_endpoint(&config, &empty), None);

        let env = EnvSnapshot::new().with(ENV_DYNAMODB_ENDPOINT, "http://env:8000");
        assert_eq!(dynamodb_endpoint(&config, &env).as_deref(), Some("http://env:8000"));

        config.dynamodb_endpoint = Some("http://flat:8000".to_string());
        assert_eq!(dynamodb_endpoint(&config, &env).as_deref(), Some("http://flat:8000"));

        config.endpoints = Some(crate::config::EndpointsBlock {
            dynamodb: Some("http://nested:8000".to_string()),
            ..Default::default()
        });
        assert_eq!(dynamodb_endpoint(&config, &env).as_deref(), Some("http://nested:8000"));
    }

    #[test]
    fn test_empty_attribute_suppresses_env() {
        let env = EnvSnapshot::new().with(ENV_STS_ENDPOINT, "http://env");
        let mut config = raw();
        config.sts_endpoint = Some(String::new());
        assert_eq!(sts_endpoint(&config, &env).as_deref(), Some(""));
    }

    #[test]
    fn test_nested_iam_and_sts_endpoints_win() {
        let env = EnvSnapshot::new()
            .with(ENV_IAM_ENDPOINT, "http://env-iam")
            .with(ENV_STS_ENDPOINT, "http://env-sts");
        let mut config = raw();
        config.iam_endpoint = Some("http://flat-iam".to_string());
        config.sts_endpoint = Some("http://flat-sts".to_string());
        assert_eq!(iam_endpoint(&config, &env).as_deref(), Some("http://flat-iam"));
        assert_eq!(sts_endpoint(&config, &env).as_deref(), Some("http://flat-sts"));

        config.endpoints = Some(crate::config::EndpointsBlock {
            iam: Some("http://nested-iam".to_string()),
            sts: Some("http://nested-sts".to_string()),
            ..Default::default()
        });
        assert_eq!(iam_endpoint(&config, &env).as_deref(), Some("http://nested-iam"));
        assert_eq!(sts_endpoint(&config, &env).as_deref(), Some("http://nested-sts"));

        let request = auth_request(&config, &env, &mut Diagnostics::new());
        assert_eq!(request.iam_endpoint.as_deref(), Some("http://nested-iam"));
        assert_eq!(request.sts_endpoint.as_deref(), Some("http://nested-sts"));
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let env = EnvSnapshot::new().with(ENV_IAM_ENDPOINT, "");
        assert_eq!(iam_endpoint(&raw(), &env), None);
    }

    #[test]
    fn test_workspace_key_prefix_default() {
        let mut config = raw();
        assert_eq!(workspace_key_prefix(&config), "env:");

        config.workspace_key_prefix = Some(String::new());
        assert_eq!(workspace_key_prefix(&config), "");

        config.workspace_key_prefix = Some("workspaces".to_string());
        assert_eq!(workspace_key_prefix(&config), "workspaces");
    }

    #[test]
    fn test_customer_key_from_attribute() {
        let mut config = raw();
        config.sse_customer_key = Some(VALID_KEY.to_string());
        let mut diags = Diagnostics::new();

        let key = customer_key(&config, &EnvSnapshot::new(), &mut diags).unwrap();
        assert!(diags.is_empty());
        assert_eq!(key.as_bytes().len(), 32);
        assert_eq!(key.to_base64(), VALID_KEY);
        assert_eq!(format!("{:?}", key), "CustomerKey(** redacted **)");
    }

    #[test]
    fn test_customer_key_wrong_length_names_attribute() {
        let mut config = raw();
        config.sse_customer_key = Some("short".to_string());
        let mut diags = Diagnostics::new();

        assert!(customer_key(&config, &EnvSnapshot::new(), &mut diags).is_none());
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Invalid sse_customer_key value");
        assert!(diag.refers_to("sse_customer_key"));
        assert_eq!(diag.detail, "sse_customer_key must be 44 characters in length");
    }

    #[test]
    fn test_customer_key_wrong_length_names_env_var() {
        let env = EnvSnapshot::new().with(ENV_SSE_CUSTOMER_KEY, "A".repeat(43));
        let mut diags = Diagnostics::new();

        assert!(customer_key(&raw(), &env, &mut diags).is_none());
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Invalid AWS_SSE_CUSTOMER_KEY value");
        assert!(diag.path.is_none());
        assert!(diag.detail.contains("\"AWS_SSE_CUSTOMER_KEY\""));
    }

    #[test]
    fn test_customer_key_attribute_suppresses_env() {
        let env = EnvSnapshot::new().with(ENV_SSE_CUSTOMER_KEY, "not valid");
        let mut config = raw();
        config.sse_customer_key = Some(VALID_KEY.to_string());
        let mut diags = Diagnostics::new();

        assert!(customer_key(&config, &env, &mut diags).is_some());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_customer_key_not_base64() {
        let mut config = raw();
        config.sse_customer_key = Some("!".repeat(44));
        let mut diags = Diagnostics::new();

        assert!(customer_key(&config, &EnvSnapshot::new(), &mut diags).is_none());
        assert!(diags
            .iter()
            .next()
            .unwrap()
            .detail
            .starts_with("sse_customer_key must be base64 encoded"));
    }

    #[test]
    fn test_customer_key_wrong_decoded_length() {
        // 44 characters, but only 31 bytes of key material
        let encoded = STANDARD.encode([7u8; 31]);
        assert_eq!(encoded.len(), 44);

        let env = EnvSnapshot::new().with(ENV_SSE_CUSTOMER_KEY, encoded);
        let mut diags = Diagnostics::new();
        assert!(customer_key(&raw(), &env, &mut diags).is_none());
        assert!(diags.iter().next().unwrap().detail.contains("got 31 bytes"));
    }

    #[test]
    fn test_no_customer_key() {
        let env = EnvSnapshot::new().with(ENV_SSE_CUSTOMER_KEY, "");
        let mut diags = Diagnostics::new();
        assert!(customer_key(&raw(), &env, &mut diags).is_none());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("900"), Some(Duration::from_secs(900)));
        assert_eq!(parse_duration("900s"), Some(Duration::from_secs(900)));
        assert_eq!(parse_duration("15m"), Some(Duration::from_secs(900)));
        assert_eq!(parse_duration("1h30m"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_duration("1.5h"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));

        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("1d"), None);
        assert_eq!(parse_duration("h"), None);
        assert_eq!(parse_duration("-5m"), None);
        assert_eq!(parse_duration("one hour"), None);
    }

    #[test]
    fn test_unparseable_duration_is_an_error_not_zero() {
        let mut config = raw();
        config.role_arn = Some("arn:aws:iam::123456789012:role/state".to_string());
        config.assume_role_duration_seconds = Some(DurationValue::Expression("soon".to_string()));
        let mut diags = Diagnostics::new();

        let request = auth_request(&config, &EnvSnapshot::new(), &mut diags);
        assert_eq!(request.assume_role.unwrap().duration, None);
        assert!(diags.has_errors());
        assert!(diags.iter().next().unwrap().refers_to("assume_role_duration_seconds"));
    }

    #[test]
    fn test_auth_request_defaults() {
        let mut diags = Diagnostics::new();
        let request = auth_request(&raw(), &EnvSnapshot::new(), &mut diags);

        assert!(diags.is_empty());
        assert_eq!(request.region.as_deref(), Some("us-east-1"));
        assert_eq!(request.max_retries, 5);
        assert_eq!(request.metadata_service, None);
        assert!(!request.skip_credentials_validation);
        assert!(request.assume_role.is_none());
        assert!(request.shared_credentials_files.is_empty());
        assert_eq!(request.caller_name, CALLER_NAME);
        assert_eq!(request.user_agent[0], UserAgentProduct::new("APN", "1.0"));
    }

    #[test]
    fn test_metadata_tristate() {
        let mut config = raw();
        let mut diags = Diagnostics::new();

        config.skip_metadata_api_check = Some(true);
        let request = auth_request(&config, &EnvSnapshot::new(), &mut diags);
        assert_eq!(request.metadata_service, Some(MetadataServiceState::Disabled));

        config.skip_metadata_api_check = Some(false);
        let request = auth_request(&config, &EnvSnapshot::new(), &mut diags);
        assert_eq!(request.metadata_service, Some(MetadataServiceState::Enabled));
    }

    #[test]
    fn test_shared_credentials_files_order() {
        let mut config = raw();
        config.shared_credentials_file = Some("/home/me/.aws/legacy".to_string());
        config.shared_credentials_files = Some(BTreeSet::from([
            "/etc/aws/b".to_string(),
            "/etc/aws/a".to_string(),
        ]));
        config.shared_config_files = Some(BTreeSet::from(["/etc/aws/config".to_string()]));
        let mut diags = Diagnostics::new();

        let request = auth_request(&config, &EnvSnapshot::new(), &mut diags);
        assert_eq!(
            request.shared_credentials_files,
            vec!["/home/me/.aws/legacy", "/etc/aws/a", "/etc/aws/b"]
        );
        assert_eq!(request.shared_config_files, vec!["/etc/aws/config"]);
    }

    #[test]
    fn test_assume_role_request() {
        let mut config = raw();
        config.role_arn = Some("arn:aws:iam::123456789012:role/state".to_string());
        config.session_name = Some("tofu".to_string());
        config.external_id = Some("ext".to_string());
        config.assume_role_duration_seconds = Some(DurationValue::Seconds(3600));
        config.assume_role_policy_arns = Some(BTreeSet::from([
            "arn:aws:iam::aws:policy/b".to_string(),
            "arn:aws:iam::aws:policy/a".to_string(),
        ]));
        config.assume_role_tags = Some(BTreeMap::from([(
            "team".to_string(),
            "infra".to_string(),
        )]));
        config.assume_role_transitive_tag_keys = Some(BTreeSet::from(["team".to_string()]));
        let mut diags = Diagnostics::new();

        let role = auth_request(&config, &EnvSnapshot::new(), &mut diags)
            .assume_role
            .unwrap();
        assert!(diags.is_empty());
        assert_eq!(role.role_arn, "arn:aws:iam::123456789012:role/state");
        assert_eq!(role.duration, Some(Duration::from_secs(3600)));
        assert_eq!(role.session_name.as_deref(), Some("tofu"));
        assert_eq!(role.external_id.as_deref(), Some("ext"));
        assert_eq!(
            role.policy_arns,
            vec!["arn:aws:iam::aws:policy/a", "arn:aws:iam::aws:policy/b"]
        );
        assert_eq!(role.tags.get("team").map(String::as_str), Some("infra"));
        assert_eq!(role.transitive_tag_keys, vec!["team"]);
    }

    #[test]
    fn test_empty_role_arn_still_builds_request() {
        let mut config = raw();
        config.role_arn = Some(String::new());
        let mut diags = Diagnostics::new();

        let role = auth_request(&config, &EnvSnapshot::new(), &mut diags).assume_role;
        assert_eq!(role.map(|r| r.role_arn), Some(String::new()));
    }

    #[test]
    fn test_iam_and_sts_endpoints_from_env() {
        let env = EnvSnapshot::new()
            .with(ENV_IAM_ENDPOINT, "http://iam.local")
            .with(ENV_STS_ENDPOINT, "http://sts.local");
        let mut config = raw();
        config.sts_endpoint = Some("http://sts.attr".to_string());
        let mut diags = Diagnostics::new();

        let request = auth_request(&config, &env, &mut diags);
        assert_eq!(request.iam_endpoint.as_deref(), Some("http://iam.local"));
        assert_eq!(request.sts_endpoint.as_deref(), Some("http://sts.attr"));
    }
}

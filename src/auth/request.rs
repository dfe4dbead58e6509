//! Authentication request types
//!
//! An [`AuthRequest`] is assembled from the backend configuration and the
//! environment, handed to an [`AuthProvider`](super::AuthProvider), and then
//! dropped. It is never persisted.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Whether the EC2 instance metadata service may be used for credentials and
/// region discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataServiceState {
    Enabled,
    Disabled,
}

/// A `name/version` product token for the user agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentProduct {
    pub name: String,
    pub version: String,
}

impl UserAgentProduct {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for UserAgentProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

/// Parameters for assuming an IAM role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    /// `None` leaves the session length to the provider
    pub duration: Option<Duration>,
    pub external_id: Option<String>,
    pub policy: Option<String>,
    pub session_name: Option<String>,
    pub policy_arns: Vec<String>,
    pub tags: BTreeMap<String, String>,
    pub transitive_tag_keys: Vec<String>,
}

/// Everything the authentication provider needs to produce a client
/// configuration
#[derive(Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub token: Option<String>,
    pub profile: Option<String>,
    pub region: Option<String>,

    pub caller_name: String,
    pub caller_documentation_url: String,
    /// Reported to the SDK as its app name; `caller_name` stands in when empty
    pub user_agent: Vec<UserAgentProduct>,

    pub max_retries: u32,
    pub skip_credentials_validation: bool,
    /// `None` leaves the provider's own default in effect
    pub metadata_service: Option<MetadataServiceState>,

    pub iam_endpoint: Option<String>,
    pub sts_endpoint: Option<String>,

    pub shared_credentials_files: Vec<String>,
    pub shared_config_files: Vec<String>,

    pub assume_role: Option<AssumeRoleRequest>,
}

impl AuthRequest {
    /// User agent products joined the way they appear on the wire
    pub fn user_agent_string(&self) -> String {
        self.user_agent
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Static credentials, when both halves of the key pair are set
    pub fn static_credentials(&self) -> Option<(&str, &str, Option<&str>)> {
        let access_key = self.access_key.as_deref().filter(|v| !v.is_empty())?;
        let secret_key = self.secret_key.as_deref().filter(|v| !v.is_empty())?;
        let token = self.token.as_deref().filter(|v| !v.is_empty());
        Some((access_key, secret_key, token))
    }
}

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "** redacted **")
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("access_key", &self.access_key)
            .field("secret_key", &redact(&self.secret_key))
            .field("token", &redact(&self.token))
            .field("profile", &self.profile)
            .field("region", &self.region)
            .field("caller_name", &self.caller_name)
            .field("caller_documentation_url", &self.caller_documentation_url)
            .field("user_agent", &self.user_agent_string())
            .field("max_retries", &self.max_retries)
            .field("skip_credentials_validation", &self.skip_credentials_validation)
            .field("metadata_service", &self.metadata_service)
            .field("iam_endpoint", &self.iam_endpoint)
            .field("sts_endpoint", &self.sts_endpoint)
            .field("shared_credentials_files", &self.shared_credentials_files)
            .field("shared_config_files", &self.shared_config_files)
            .field("assume_role", &self.assume_role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AuthRequest {
        AuthRequest {
            access_key: Some("AKIAEXAMPLE".to_string()),
            secret_key: Some("wJalrXUtnFEMI".to_string()),
            token: Some("session-token".to_string()),
            profile: None,
            region: Some("us-east-1".to_string()),
            caller_name: "S3 Backend".to_string(),
            caller_documentation_url: String::new(),
            user_agent: vec![
                UserAgentProduct::new("APN", "1.0"),
                UserAgentProduct::new("s3-state-backend", "0.1.0"),
            ],
            max_retries: 5,
            skip_credentials_validation: false,
            metadata_service: None,
            iam_endpoint: None,
            sts_endpoint: None,
            shared_credentials_files: Vec::new(),
            shared_config_files: Vec::new(),
            assume_role: None,
        }
    }

    #[test]
    fn test_user_agent_string() {
        assert_eq!(
            request().user_agent_string(),
            "APN/1.0 s3-state-backend/0.1.0"
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let out = format!("{:?}", request());
        assert!(out.contains("AKIAEXAMPLE"));
        assert!(!out.contains("wJalrXUtnFEMI"));
        assert!(!out.contains("session-token"));
    }

    #[test]
    fn test_static_credentials_need_both_keys() {
        let req = request();
        assert_eq!(
            req.static_credentials(),
            Some(("AKIAEXAMPLE", "wJalrXUtnFEMI", Some("session-token")))
        );

        let mut req = request();
        req.secret_key = Some(String::new());
        assert!(req.static_credentials().is_none());

        let mut req = request();
        req.access_key = None;
        assert!(req.static_credentials().is_none());
    }
}

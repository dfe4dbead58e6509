//! Environment variable lookup
//!
//! Environment variables are fallback sources only; they never override an
//! explicit attribute. Lookups go through [`EnvLookup`] so validation and
//! configuration can be driven by an in-memory snapshot in tests.

use std::collections::HashMap;
use std::env;

/// Env var: region (preferred name)
pub const ENV_REGION: &str = "AWS_REGION";
/// Env var: region (alternative name)
pub const ENV_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
/// Env var: base64-encoded SSE-C customer key
pub const ENV_SSE_CUSTOMER_KEY: &str = "AWS_SSE_CUSTOMER_KEY";
/// Env var: IAM endpoint override
pub const ENV_IAM_ENDPOINT: &str = "AWS_IAM_ENDPOINT";
/// Env var: STS endpoint override
pub const ENV_STS_ENDPOINT: &str = "AWS_STS_ENDPOINT";
/// Env var: S3 endpoint override
pub const ENV_S3_ENDPOINT: &str = "AWS_S3_ENDPOINT";
/// Env var: DynamoDB endpoint override
pub const ENV_DYNAMODB_ENDPOINT: &str = "AWS_DYNAMODB_ENDPOINT";

/// Read access to environment variables
///
/// Implementations return `None` for unset variables. Empty values are
/// treated as unset by [`EnvLookup::non_empty`].
pub trait EnvLookup: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;

    /// Value of `name` if it is set to a non-empty string
    fn non_empty(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// First non-empty value among `names`, in order
    fn first_non_empty(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.non_empty(name))
    }
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// Fixed set of environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl EnvLookup for EnvSnapshot {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

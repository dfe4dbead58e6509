//! KMS key identifier validation
//!
//! Accepts a key id (UUID or multi-region `mrk-` id), an alias
//! (`alias/<name>`), or the ARN of either.

use regex::Regex;
use std::sync::OnceLock;

use crate::diagnostics::{AttributePath, Diagnostics};

const KEY_ID_PATTERN: &str =
    r"[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}|mrk-[a-f0-9]{32}";
const ALIAS_PATTERN: &str = r"alias/[a-zA-Z0-9/_-]+";

fn key_id_or_alias() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("^(?:{KEY_ID_PATTERN}|{ALIAS_PATTERN})$"))
            .expect("static KMS key id pattern")
    })
}

fn arn_key_resource() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("^key/(?:{KEY_ID_PATTERN})$")).expect("static KMS key ARN pattern")
    })
}

fn arn_alias_resource() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("^(?:{ALIAS_PATTERN})$")).expect("static KMS alias ARN pattern")
    })
}

/// Components of an Amazon Resource Name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn<'a> {
    pub partition: &'a str,
    pub service: &'a str,
    pub region: &'a str,
    pub account_id: &'a str,
    pub resource: &'a str,
}

impl<'a> Arn<'a> {
    /// Parse `arn:partition:service:region:account-id:resource`
    ///
    /// The resource section may itself contain `:`.
    pub fn parse(s: &'a str) -> Option<Self> {
        let mut sections = s.splitn(6, ':');
        if sections.next()? != "arn" {
            return None;
        }
        Some(Self {
            partition: sections.next()?,
            service: sections.next()?,
            region: sections.next()?,
            account_id: sections.next()?,
            resource: sections.next()?,
        })
    }
}

/// Whether `s` has the shape of an ARN, without fully parsing it
pub fn is_arn(s: &str) -> bool {
    s.starts_with("arn:") && s.matches(':').count() >= 5
}

/// Validate a `kms_key_id` value, reporting errors against `path`
pub fn validate_kms_key(path: AttributePath, value: &str) -> Diagnostics {
    if is_arn(value) {
        validate_kms_key_arn(path, value)
    } else {
        validate_kms_key_id(path, value)
    }
}

fn validate_kms_key_id(path: AttributePath, value: &str) -> Diagnostics {
    let mut diags = Diagnostics::new();
    if !key_id_or_alias().is_match(value) {
        diags.error(
            "Invalid KMS Key ID",
            format!("Value must be a valid KMS Key ID, got {:?}", value),
            path,
        );
    }
    diags
}

fn validate_kms_key_arn(path: AttributePath, value: &str) -> Diagnostics {
    let mut diags = Diagnostics::new();
    let valid = Arn::parse(value).is_some_and(|arn| {
        arn_key_resource().is_match(arn.resource) || arn_alias_resource().is_match(arn.resource)
    });
    if !valid {
        diags.error(
            "Invalid KMS Key ARN",
            format!("Value must be a valid KMS Key ARN, got {:?}", value),
            path,
        );
    }
    diags
}

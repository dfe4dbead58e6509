//! Backend configuration
//!
//! The attribute schema, the raw document the host hands over, validation,
//! and resolution of effective values from attributes and the environment.

pub mod aws;
pub mod env;
pub mod kms;
pub mod raw;
pub mod region;
pub mod resolve;
pub mod schema;
pub mod settings;
pub mod validate;

pub use aws::{create_dynamodb_client, create_s3_client, create_sts_client};
pub use env::{EnvLookup, EnvSnapshot, ProcessEnv};
pub use raw::{DurationValue, EndpointsBlock, RawConfig};
pub use resolve::{CustomerKey, CustomerKeySource};
pub use schema::{schema, Attribute, ConfigSchema, Nesting, NestedObject, ValueKind};
pub use settings::{CliSettings, LogFormat};
pub use validate::validate;

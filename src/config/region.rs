//! Static region validation
//!
//! Region names are checked against the regions of every AWS partition known
//! at build time. `skip_region_validation` bypasses the check for regions
//! added after this table was last updated.

const KNOWN_REGIONS: &[&str] = &[
    // aws
    "af-south-1",
    "ap-east-1",
    "ap-east-2",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-southeast-5",
    "ap-southeast-7",
    "ca-central-1",
    "ca-west-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "mx-central-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    // aws-cn
    "cn-north-1",
    "cn-northwest-1",
    // aws-us-gov
    "us-gov-east-1",
    "us-gov-west-1",
    // aws-iso
    "us-iso-east-1",
    "us-iso-west-1",
    // aws-iso-b
    "us-isob-east-1",
    // aws-iso-e
    "eu-isoe-west-1",
    // aws-iso-f
    "us-isof-east-1",
    "us-isof-south-1",
];

/// Error returned for a region missing from the known-region table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid AWS Region: {0}")]
pub struct InvalidRegion(pub String);

/// Check that `region` is a known AWS region
pub fn validate_region(region: &str) -> Result<(), InvalidRegion> {
    if KNOWN_REGIONS.contains(&region) {
        Ok(())
    } else {
        Err(InvalidRegion(region.to_string()))
    }
}

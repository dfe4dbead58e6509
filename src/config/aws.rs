//! AWS service clients
//!
//! Builds the S3, DynamoDB and STS clients from a resolved [`SdkConfig`], applying
//! per-service endpoint overrides for local testing (LocalStack, MinIO,
//! DynamoDB Local) and S3 path-style addressing.

use aws_config::SdkConfig;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sts::Client as StsClient;

/// Create the S3 client
///
/// `endpoint_url` replaces the resolved S3 endpoint. `force_path_style` is only
/// applied when given, leaving the SDK's addressing default otherwise.
pub fn create_s3_client(
    sdk_config: &SdkConfig,
    endpoint_url: Option<&str>,
    force_path_style: Option<bool>,
) -> S3Client {
    let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);

    if let Some(endpoint_url) = endpoint_url {
        tracing::info!(endpoint = %endpoint_url, "Using custom S3 endpoint");
        builder = builder.endpoint_url(endpoint_url);
    }
    if let Some(force_path_style) = force_path_style {
        builder = builder.force_path_style(force_path_style);
    }

    S3Client::from_conf(builder.build())
}

/// Create the DynamoDB client used for state locking
pub fn create_dynamodb_client(sdk_config: &SdkConfig, endpoint_url: Option<&str>) -> DynamoDbClient {
    if let Some(endpoint_url) = endpoint_url {
        tracing::info!(endpoint = %endpoint_url, "Using custom DynamoDB endpoint");

        let dynamodb_config = aws_sdk_dynamodb::config::Builder::from(sdk_config)
            .endpoint_url(endpoint_url)
            .build();

        DynamoDbClient::from_conf(dynamodb_config)
    } else {
        DynamoDbClient::new(sdk_config)
    }
}

/// Create the STS client used to validate credentials
pub fn create_sts_client(sdk_config: &SdkConfig, endpoint_url: Option<&str>) -> StsClient {
    if let Some(endpoint_url) = endpoint_url {
        tracing::info!(endpoint = %endpoint_url, "Using custom STS endpoint");

        let sts_config = aws_sdk_sts::config::Builder::from(sdk_config)
            .endpoint_url(endpoint_url)
            .build();

        StsClient::from_conf(sts_config)
    } else {
        StsClient::new(sdk_config)
    }
}

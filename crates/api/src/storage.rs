//! Presigned upload URLs for attachments.
//!
//! The gateway never proxies file bytes: clients receive a short-lived
//! presigned PUT URL and upload directly to the bucket.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use serde::Serialize;

use crate::config::StorageConfig;
use crate::error::AppError;

/// Upload URLs expire after ten minutes.
const UPLOAD_URL_TTL: Duration = Duration::from_secs(600);

/// Issues presigned PUT URLs against one bucket.
pub struct UploadSigner {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

/// Response payload for `POST /attachments/signed-url`.
#[derive(Debug, Serialize)]
pub struct SignedUpload {
    /// Presigned PUT URL the client uploads to.
    pub upload_url: String,
    /// Stable URL of the object once uploaded.
    pub public_url: String,
}

impl UploadSigner {
    /// Build a signer from the ambient AWS environment (credentials chain,
    /// region override from config).
    pub async fn load(config: &StorageConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
        }
    }

    /// Build a signer over an explicit client (used by tests with static
    /// credentials).
    pub fn with_client(client: aws_sdk_s3::Client, bucket: String, region: String) -> Self {
        Self {
            client,
            bucket,
            region,
        }
    }

    /// Presign a PUT of `filename` with the given content type.
    pub async fn presign_upload(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<SignedUpload, AppError> {
        let presigning = PresigningConfig::expires_in(UPLOAD_URL_TTL)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(filename)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::ServiceUnavailable(format!(
                    "Object storage not available. Check bucket '{}' and AWS credentials. \
                     Error: {e}",
                    self.bucket
                ))
            })?;

        Ok(SignedUpload {
            upload_url: presigned.uri().to_string(),
            public_url: format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, filename
            ),
        })
    }
}

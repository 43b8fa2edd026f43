//! S3/R2 storage service for progress backups.

use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client, Config,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("S3 error: {0}")]
    S3(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// S3/R2 storage service for backup uploads.
pub struct StorageService {
    client: Client,
    bucket: String,
}

impl StorageService {
    /// Create a new storage service from environment variables.
    ///
    /// Required env vars:
    /// - S3_BUCKET: Bucket name
    /// - S3_ACCESS_KEY: Access key ID
    /// - S3_SECRET_KEY: Secret access key
    ///
    /// Optional: S3_REGION (defaults to "auto" for Cloudflare R2) and
    /// S3_ENDPOINT for S3-compatible services.
    pub fn from_env() -> Result<Self, StorageError> {
        let bucket = require_var("S3_BUCKET")?;
        let access_key = require_var("S3_ACCESS_KEY")?;
        let secret_key = require_var("S3_SECRET_KEY")?;
        let region = std::env::var("S3_REGION").unwrap_or_else(|_| "auto".to_string());
        let endpoint = std::env::var("S3_ENDPOINT").ok();

        let credentials = Credentials::new(access_key, secret_key, None, None, "env");

        let mut config_builder = Config::builder()
            .region(Region::new(region))
            .credentials_provider(credentials)
            .behavior_version_latest();

        if let Some(endpoint_url) = endpoint {
            config_builder = config_builder
                .endpoint_url(endpoint_url)
                .force_path_style(true);
        }

        let client = Client::from_conf(config_builder.build());

        Ok(Self { client, bucket })
    }

    /// Upload an object and return its key.
    pub async fn upload_file(
        &self,
        key: &str,
        content: &[u8],
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let body = ByteStream::from(content.to_vec());

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        tracing::info!("Uploaded backup to S3: {}", key);
        Ok(key.to_string())
    }

    /// Generate the S3 key for a device's file.
    ///
    /// Format: `{device_id}/{file_path}`
    pub fn make_key(device_id: &str, file_path: &str) -> String {
        format!("{}/{}", device_id, file_path.trim_start_matches('/'))
    }
}

fn require_var(name: &str) -> Result<String, StorageError> {
    std::env::var(name).map_err(|_| StorageError::Config(format!("{} not set", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        assert_eq!(
            StorageService::make_key("abc", "/progress_2024-05-01.json"),
            "abc/progress_2024-05-01.json"
        );
        assert_eq!(StorageService::make_key("abc", "x.json"), "abc/x.json");
    }

    #[test]
    fn test_missing_var_is_config_error() {
        let err = require_var("VOCAB_TEST_DEFINITELY_UNSET").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: VOCAB_TEST_DEFINITELY_UNSET not set"
        );
    }
}

//! S3 storage client implementation using the AWS S3 SDK

use crate::error::{Error, Result};
use crate::storage::{ClientOptions, CredentialSource, StorageClient, StorageClientFactory};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::{config::Region, primitives::ByteStream, Client};
use std::path::Path;
use tracing::debug;

/// Region used when neither the configuration nor the environment names one
const FALLBACK_REGION: &str = "us-east-1";

/// Name reported by the static credentials provider
const PROVIDER_NAME: &str = "s3-upload";

/// Builds [`S3StorageClient`]s from the shared AWS configuration chain
#[derive(Debug, Clone, Copy, Default)]
pub struct S3ClientFactory;

#[async_trait]
impl StorageClientFactory for S3ClientFactory {
    async fn create(
        &self,
        credentials: &CredentialSource,
        options: &ClientOptions,
    ) -> Result<Box<dyn StorageClient>> {
        let region = RegionProviderChain::first_try(options.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::new(FALLBACK_REGION));

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

        if let CredentialSource::Static {
            access_key,
            secret_key,
        } = credentials
        {
            debug!("using static credentials");
            loader = loader.credentials_provider(Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                PROVIDER_NAME,
            ));
        } else {
            debug!("using default credential chain");
        }

        let sdk_config = loader.load().await;
        let config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(options.force_path_style)
            .build();

        Ok(Box::new(S3StorageClient::new(Client::from_conf(config))))
    }
}

/// S3 client for bucket checks and uploads
pub struct S3StorageClient {
    client: Client,
}

impl S3StorageClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageClient for S3StorageClient {
    fn set_endpoint(&mut self, endpoint: &str) {
        let config = self
            .client
            .config()
            .to_builder()
            .endpoint_url(normalize_endpoint(endpoint))
            .build();
        self.client = Client::from_conf(config);
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err.as_service_error().is_some_and(|e| e.is_not_found()) {
                    return Ok(false);
                }
                // HeadBucket carries no error body, so a denied lookup only shows up as 403
                match err.raw_response().map(|r| r.status().as_u16()) {
                    Some(403) | Some(404) => Ok(false),
                    _ => Err(err.into()),
                }
            }
        }
    }

    async fn upload(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| Error::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await?;

        Ok(())
    }
}

/// Endpoints given as a bare host name are reached over HTTPS.
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}

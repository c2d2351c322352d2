//! Upload orchestration: merge, validate, connect, check bucket, upload

use crate::config::{validate_config, ErrorPolicy, UploadConfig};
use crate::descriptor::UploadDescriptor;
use crate::error::{Error, Result, UploadFailure};
use crate::storage::{resolve_credentials, ClientOptions, StorageClient, StorageClientFactory};
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Descriptors transferred, in upload order. Empty on a dry run.
    pub uploaded: Vec<UploadDescriptor>,
    pub dry_run: bool,
}

/// Runs one upload invocation against the storage backend built by `F`.
pub struct Uploader<F> {
    factory: F,
}

impl<F: StorageClientFactory> Uploader<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// Merge the configured descriptors, validate all of them, then upload each
    /// in order. Every validation happens before the first network call.
    pub async fn run(&self, config: &UploadConfig) -> Result<UploadReport> {
        let descriptors = config.merged_descriptors();
        if descriptors.is_empty() {
            return Err(Error::NoFilesSpecified);
        }

        for descriptor in &descriptors {
            validate_descriptor(descriptor)?;
        }
        validate_config(config)?;
        debug!(count = descriptors.len(), "descriptors validated");

        let credentials =
            resolve_credentials(config.access_key.as_deref(), config.secret_key.as_deref());
        let options = ClientOptions {
            region: config.region.clone(),
            force_path_style: config.force_path_style,
        };
        let mut client = self.factory.create(&credentials, &options).await?;
        if let Some(endpoint) = &config.endpoint {
            debug!(endpoint = %endpoint, "overriding endpoint");
            client.set_endpoint(endpoint);
        }

        let bucket = config.bucket_name.as_str();
        if !client.bucket_exists(bucket).await? {
            return Err(Error::BucketNotFound(bucket.to_string()));
        }
        debug!(bucket = %bucket, "bucket found");

        if config.do_not_upload {
            info!(
                "Dry run: {} file(s) validated, nothing uploaded to s3://{}",
                descriptors.len(),
                bucket
            );
            return Ok(UploadReport {
                uploaded: Vec::new(),
                dry_run: true,
            });
        }

        let mut uploaded = Vec::with_capacity(descriptors.len());
        let mut failures = Vec::new();
        for descriptor in descriptors {
            match upload_one(client.as_ref(), bucket, &descriptor).await {
                Ok(()) => uploaded.push(descriptor),
                Err(failure) => match config.on_error {
                    ErrorPolicy::Abort => return Err(Error::UploadFailed(failure)),
                    ErrorPolicy::Continue => {
                        warn!("{}", Error::UploadFailed(failure.clone()));
                        failures.push(failure);
                    }
                },
            }
        }

        if !failures.is_empty() {
            return Err(Error::UploadsFailed(failures));
        }

        Ok(UploadReport {
            uploaded,
            dry_run: false,
        })
    }
}

fn validate_descriptor(descriptor: &UploadDescriptor) -> Result<()> {
    let source = Path::new(descriptor.source());
    if descriptor.source().is_empty() || !source.exists() {
        return Err(Error::SourceNotFound(source.to_path_buf()));
    }
    match descriptor.destination() {
        Some(destination) if !destination.is_empty() => Ok(()),
        _ => Err(Error::DestinationMissing(descriptor.source().to_string())),
    }
}

async fn upload_one(
    client: &dyn StorageClient,
    bucket: &str,
    descriptor: &UploadDescriptor,
) -> std::result::Result<(), UploadFailure> {
    let source = descriptor.source();
    // validated before any upload starts
    let destination = descriptor.destination().unwrap_or_default();

    client
        .upload(bucket, destination, Path::new(source))
        .await
        .map_err(|e| UploadFailure {
            source: source.to_string(),
            bucket: bucket.to_string(),
            destination: destination.to_string(),
            cause: e.to_string(),
        })?;

    info!("File {} uploaded to s3://{}/{}", source, bucket, destination);
    Ok(())
}

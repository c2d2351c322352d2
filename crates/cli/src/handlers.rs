//! Command handlers for the s3-upload CLI

use crate::Cli;
use anyhow::Result;
use s3_upload_core::{
    load_config, Error, ErrorPolicy, S3ClientFactory, UploadConfig, Uploader,
};
use tracing::info;

/// Handle the upload run
pub async fn handle_upload(cli: Cli) -> Result<()> {
    let config = build_config(cli)?;

    let report = Uploader::new(S3ClientFactory).run(&config).await?;

    if !report.dry_run {
        info!(
            "{} file(s) uploaded to bucket '{}'",
            report.uploaded.len(),
            config.bucket_name
        );
    }

    Ok(())
}

/// Layer command-line values over the optional config file
fn build_config(cli: Cli) -> Result<UploadConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => UploadConfig::default(),
    };

    if let Some(access_key) = cli.access_key {
        config.access_key = Some(access_key);
    }
    if let Some(secret_key) = cli.secret_key {
        config.secret_key = Some(secret_key);
    }
    if let Some(bucket_name) = cli.bucket_name {
        config.bucket_name = bucket_name;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = Some(endpoint);
    }
    if let Some(region) = cli.region {
        config.region = Some(region);
    }
    if let Some(source_file) = cli.source_file {
        config.source_file = Some(source_file);
    }
    if let Some(destination_file) = cli.destination_file {
        config.destination_file = Some(destination_file);
    }
    config.force_path_style |= cli.force_path_style;
    config.do_not_upload |= cli.do_not_upload;
    if cli.continue_on_error {
        config.on_error = ErrorPolicy::Continue;
    }
    config.files.extend(cli.files);

    if config.bucket_name.trim().is_empty() {
        return Err(Error::InvalidInput(
            "Bucket name required (--bucket-name, S3_UPLOAD_BUCKET_NAME or bucket-name in the config file)"
                .to_string(),
        )
        .into());
    }

    Ok(config)
}

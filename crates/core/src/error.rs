//! Error types for s3-upload-core

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for s3-upload-core
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for s3-upload-core
#[derive(Error, Debug)]
pub enum Error {
    /// The merged descriptor list is empty
    #[error("No files specified for upload")]
    NoFilesSpecified,

    /// Local source file missing
    #[error("File doesn't exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// No destination key given for a source
    #[error("Destination file is not set for {0}")]
    DestinationMissing(String),

    /// Target bucket does not exist or is not visible to the caller
    #[error("Bucket doesn't exist: {0}")]
    BucketNotFound(String),

    /// A single transfer was interrupted or rejected
    #[error("Unable to upload file {} to s3://{}/{}: {}", .0.source, .0.bucket, .0.destination, .0.cause)]
    UploadFailed(UploadFailure),

    /// Several transfers failed while running with `ErrorPolicy::Continue`
    #[error("{} upload(s) failed: {}", .0.len(), join_failures(.0))]
    UploadsFailed(Vec<UploadFailure>),

    /// Configuration file not found
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage service errors other than "bucket not found"
    #[error("Storage operation failed: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error("Invalid configuration format: {0}")]
    Deserialization(#[from] toml::de::Error),
}

/// Context for one failed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub source: String,
    pub bucket: String,
    pub destination: String,
    pub cause: String,
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> s3://{}/{} ({})",
            self.source, self.bucket, self.destination, self.cause
        )
    }
}

fn join_failures(failures: &[UploadFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Generic SdkError conversion for all S3 operations
impl<E> From<aws_sdk_s3::error::SdkError<E>> for Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: aws_sdk_s3::error::SdkError<E>) -> Self {
        Error::Storage(aws_sdk_s3::error::DisplayErrorContext(err).to_string())
    }
}

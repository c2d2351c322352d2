//! s3-upload-core - Core library for the s3-upload build step
//!
//! Uploads a fixed, ordered list of local files to an S3 bucket: configuration
//! model, input validation, credential resolution, storage client and the
//! orchestrator tying them together.

pub mod client;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod storage;
pub mod uploader;

// Re-export commonly used types
pub use client::{S3ClientFactory, S3StorageClient};
pub use config::{load_config, validate_config, ErrorPolicy, UploadConfig};
pub use descriptor::UploadDescriptor;
pub use error::{Error, Result, UploadFailure};
pub use storage::{
    resolve_credentials, ClientOptions, CredentialSource, StorageClient, StorageClientFactory,
};
pub use uploader::{UploadReport, Uploader};

//! Configuration for a single upload run

use crate::descriptor::UploadDescriptor;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// What to do when one transfer fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop at the first failed transfer
    #[default]
    Abort,
    /// Attempt every descriptor and report all failures at the end
    Continue,
}

/// Parameters consumed once per invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UploadConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    #[serde(default)]
    pub bucket_name: String,

    /// Overrides the default service endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Path-style addressing, needed by most S3-compatible servers
    #[serde(default)]
    pub force_path_style: bool,

    /// Validate and check the bucket, but transfer nothing
    #[serde(default)]
    pub do_not_upload: bool,

    /// Legacy single-file source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// Legacy single-file destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_file: Option<String>,

    #[serde(default)]
    pub files: Vec<UploadDescriptor>,

    #[serde(default)]
    pub on_error: ErrorPolicy,
}

impl UploadConfig {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            ..Default::default()
        }
    }

    /// The `files` list followed by the legacy `source_file`/`destination_file`
    /// pair, if a legacy source is set.
    pub fn merged_descriptors(&self) -> Vec<UploadDescriptor> {
        let mut descriptors = self.files.clone();
        if let Some(source) = &self.source_file {
            descriptors.push(UploadDescriptor::new(
                source.clone(),
                self.destination_file.clone(),
            ));
        }
        descriptors
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<UploadConfig> {
    if !path.exists() {
        return Err(Error::ConfigNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let config: UploadConfig = toml::from_str(&content)?;

    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &UploadConfig) -> Result<()> {
    if config.bucket_name.trim().is_empty() {
        return Err(Error::InvalidInput("Bucket name cannot be empty".to_string()));
    }

    // Credentials are used only as a pair
    match (&config.access_key, &config.secret_key) {
        (Some(_), None) => {
            warn!("access key given without secret key, using default credential chain")
        }
        (None, Some(_)) => {
            warn!("secret key given without access key, using default credential chain")
        }
        _ => {}
    }

    if let Some(endpoint) = &config.endpoint {
        if endpoint.trim().is_empty() {
            return Err(Error::InvalidInput("Endpoint cannot be empty".to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_merge_appends_legacy_pair_last() {
        let mut config = UploadConfig::new("bucket");
        config.files = vec![
            UploadDescriptor::new("a.txt", Some("x/a.txt".to_string())),
            UploadDescriptor::new("b.txt", Some("x/b.txt".to_string())),
        ];
        config.source_file = Some("legacy.txt".to_string());
        config.destination_file = Some("x/legacy.txt".to_string());

        let merged = config.merged_descriptors();
        let sources: Vec<&str> = merged.iter().map(|d| d.source()).collect();
        assert_eq!(sources, vec!["a.txt", "b.txt", "legacy.txt"]);
        assert_eq!(merged[2].destination(), Some("x/legacy.txt"));
    }

    #[test]
    fn test_merge_legacy_without_destination() {
        let mut config = UploadConfig::new("bucket");
        config.source_file = Some("legacy.txt".to_string());

        let merged = config.merged_descriptors();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].destination(), None);
    }

    #[test]
    fn test_merge_ignores_lone_destination() {
        let mut config = UploadConfig::new("bucket");
        config.destination_file = Some("x/orphan.txt".to_string());
        assert!(config.merged_descriptors().is_empty());
    }

    #[test]
    fn test_load_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
bucket-name = "artifacts"
endpoint = "custom.example.com"
do-not-upload = true
on-error = "continue"

[[files]]
source = "target/app.jar"
destination = "releases/app.jar"

[[files]]
source = "README.md"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.bucket_name, "artifacts");
        assert_eq!(config.endpoint.as_deref(), Some("custom.example.com"));
        assert!(config.do_not_upload);
        assert!(!config.force_path_style);
        assert_eq!(config.on_error, ErrorPolicy::Continue);
        assert_eq!(config.files.len(), 2);
        assert_eq!(config.files[0].destination(), Some("releases/app.jar"));
        assert_eq!(config.files[1].destination(), None);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(load_config(&path), Err(Error::ConfigNotFound(p)) if p == path));
    }

    #[test]
    fn test_load_config_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bucket-name = [").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, Error::Deserialization(_)));
        assert!(err.to_string().starts_with("Invalid configuration format"));
    }

    #[test]
    fn test_load_config_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_config(dir.path()), Err(Error::Io(_))));
    }

    #[test]
    fn test_validate_config_valid() {
        assert!(validate_config(&UploadConfig::new("bucket")).is_ok());
    }

    #[test]
    fn test_validate_config_empty_bucket() {
        assert!(matches!(
            validate_config(&UploadConfig::new("  ")),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_config_lone_key_is_not_an_error() {
        let mut config = UploadConfig::new("bucket");
        config.access_key = Some("AK".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_empty_endpoint() {
        let mut config = UploadConfig::new("bucket");
        config.endpoint = Some(String::new());
        assert!(validate_config(&config).is_err());
    }
}

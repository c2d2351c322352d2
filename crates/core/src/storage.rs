//! Storage capabilities the orchestrator depends on
//!
//! The orchestrator only ever talks to these two traits. [`crate::client`] backs
//! them with the AWS S3 SDK; tests back them with `mockall` mocks.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// Resolved source of authentication material
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Fixed access key / secret key pair
    Static {
        access_key: String,
        secret_key: String,
    },
    /// Environment, profile files, instance metadata, ... as discovered by the SDK
    DefaultChain,
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Static { access_key, .. } => f
                .debug_struct("Static")
                .field("access_key", access_key)
                .field("secret_key", &"** redacted **")
                .finish(),
            CredentialSource::DefaultChain => f.write_str("DefaultChain"),
        }
    }
}

/// Static credentials when both keys are present, the default chain otherwise.
pub fn resolve_credentials(
    access_key: Option<&str>,
    secret_key: Option<&str>,
) -> CredentialSource {
    match (access_key, secret_key) {
        (Some(access_key), Some(secret_key))
            if !access_key.is_empty() && !secret_key.is_empty() =>
        {
            CredentialSource::Static {
                access_key: access_key.to_string(),
                secret_key: secret_key.to_string(),
            }
        }
        _ => CredentialSource::DefaultChain,
    }
}

/// Client settings that are fixed at construction time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    pub region: Option<String>,
    pub force_path_style: bool,
}

/// Bucket lookup and blocking single-file transfer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Point the client at another service endpoint. Must precede any request.
    fn set_endpoint(&mut self, endpoint: &str);

    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Upload one local file and wait until the transfer completes or fails.
    async fn upload(&self, bucket: &str, key: &str, path: &Path) -> Result<()>;
}

/// Builds a [`StorageClient`] from resolved credentials
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClientFactory: Send + Sync {
    async fn create(
        &self,
        credentials: &CredentialSource,
        options: &ClientOptions,
    ) -> Result<Box<dyn StorageClient>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_static_credentials() {
        assert_eq!(
            resolve_credentials(Some("AK"), Some("SK")),
            CredentialSource::Static {
                access_key: "AK".to_string(),
                secret_key: "SK".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_default_chain() {
        assert_eq!(resolve_credentials(None, None), CredentialSource::DefaultChain);
        assert_eq!(resolve_credentials(Some("AK"), None), CredentialSource::DefaultChain);
        assert_eq!(resolve_credentials(None, Some("SK")), CredentialSource::DefaultChain);
        assert_eq!(resolve_credentials(Some(""), Some("SK")), CredentialSource::DefaultChain);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = resolve_credentials(Some("AK"), Some("very-secret"));
        let printed = format!("{:?}", creds);
        assert!(printed.contains("AK"));
        assert!(!printed.contains("very-secret"));
    }
}

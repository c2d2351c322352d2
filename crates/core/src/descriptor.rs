//! Upload descriptors: one local file and the key it is stored under

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// A (source path, destination key) pair slated for upload.
///
/// Nothing is checked at construction time; the orchestrator validates every
/// descriptor before any network call is made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDescriptor {
    source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination: Option<String>,
}

impl UploadDescriptor {
    pub fn new(source: impl Into<String>, destination: Option<String>) -> Self {
        Self {
            source: source.into(),
            destination,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn set_destination(&mut self, destination: Option<String>) {
        self.destination = destination;
    }
}

/// Parses `SOURCE=DESTINATION`. A token without `=` has no destination.
impl FromStr for UploadDescriptor {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.split_once('=') {
            Some((source, destination)) => Self::new(source, Some(destination.to_string())),
            None => Self::new(s, None),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut d = UploadDescriptor::default();
        d.set_source("target/app.jar");
        d.set_destination(Some("releases/app.jar".to_string()));
        assert_eq!(d.source(), "target/app.jar");
        assert_eq!(d.destination(), Some("releases/app.jar"));
    }

    #[test]
    fn test_parse_pair() {
        let d: UploadDescriptor = "dist/site.zip=web/site.zip".parse().unwrap();
        assert_eq!(d.source(), "dist/site.zip");
        assert_eq!(d.destination(), Some("web/site.zip"));
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let d: UploadDescriptor = "a.txt=k=v.txt".parse().unwrap();
        assert_eq!(d.source(), "a.txt");
        assert_eq!(d.destination(), Some("k=v.txt"));
    }

    #[test]
    fn test_parse_without_destination() {
        let d: UploadDescriptor = "lonely.txt".parse().unwrap();
        assert_eq!(d.source(), "lonely.txt");
        assert_eq!(d.destination(), None);
    }
}

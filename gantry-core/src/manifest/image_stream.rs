//! ImageStream accessor

use super::Walk;
use crate::domain::ResourceKind;
use crate::error::{ManifestError, Result};
use serde_json::Value;

const KIND: ResourceKind = ResourceKind::ImageStream;

/// Read-only view over an ImageStream document
///
/// `status.tags` holds one entry per tag, each with an ordered item list,
/// newest push first. Lookups in both directions are hard failures on a
/// miss: callers treat a dangling tag or digest as a deployment-integrity
/// violation, never as "no result".
#[derive(Debug, Clone)]
pub struct ImageStreamManifest {
    doc: Value,
}

impl ImageStreamManifest {
    /// Parse from a raw JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            doc: super::parse(KIND, json)?,
        })
    }

    /// Wrap an already-fetched document
    pub fn from_value(doc: Value) -> Self {
        Self { doc }
    }

    fn tags(&self) -> Result<Vec<Walk<'_>>> {
        Walk::root(KIND, &self.doc)
            .key("status")?
            .key("tags")?
            .elements()
    }

    /// The digest the tag currently points at (its most recent push)
    pub fn digest_for_tag(&self, tag: &str) -> Result<String> {
        for entry in self.tags()? {
            if entry.key("tag")?.string()? == tag {
                return entry.key("items")?.index(0)?.key("image")?.string();
            }
        }
        Err(ManifestError::TagNotFound(tag.to_string()))
    }

    /// The first tag whose push history contains the digest
    pub fn tag_for_digest(&self, digest: &str) -> Result<String> {
        for entry in self.tags()? {
            for item in entry.key("items")?.elements()? {
                if item.key("image")?.string()? == digest {
                    return entry.key("tag")?.string();
                }
            }
        }
        Err(ManifestError::DigestNotFound(digest.to_string()))
    }

    /// Digest of the `latest` tag
    pub fn latest_digest(&self) -> Result<String> {
        self.digest_for_tag("latest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stream() -> ImageStreamManifest {
        ImageStreamManifest::from_value(json!({
            "status": {
                "tags": [
                    {
                        "tag": "latest",
                        "items": [
                            { "image": "sha256:aaa" },
                            { "image": "sha256:old" }
                        ]
                    },
                    {
                        "tag": "v2",
                        "items": [
                            { "image": "sha256:bbb" }
                        ]
                    }
                ]
            }
        }))
    }

    #[test]
    fn test_digest_for_tag_takes_newest_item() {
        assert_eq!(stream().digest_for_tag("latest").unwrap(), "sha256:aaa");
        assert_eq!(stream().digest_for_tag("v2").unwrap(), "sha256:bbb");
    }

    #[test]
    fn test_tag_for_digest_scans_history() {
        assert_eq!(stream().tag_for_digest("sha256:old").unwrap(), "latest");
        assert_eq!(stream().tag_for_digest("sha256:bbb").unwrap(), "v2");
    }

    #[test]
    fn test_lookups_are_inverse() {
        let stream = stream();
        let digest = stream.digest_for_tag("v2").unwrap();
        assert_eq!(stream.tag_for_digest(&digest).unwrap(), "v2");
    }

    #[test]
    fn test_missing_tag_is_not_found() {
        let err = stream().digest_for_tag("v9").unwrap_err();
        assert!(matches!(err, ManifestError::TagNotFound(ref tag) if tag == "v9"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_digest_is_not_found() {
        let err = stream().tag_for_digest("sha256:zzz").unwrap_err();
        assert!(matches!(err, ManifestError::DigestNotFound(_)));
    }

    #[test]
    fn test_latest_digest() {
        assert_eq!(stream().latest_digest().unwrap(), "sha256:aaa");
    }

    #[test]
    fn test_stream_without_status_is_malformed() {
        let manifest = ImageStreamManifest::from_value(json!({ "metadata": {} }));
        assert!(matches!(
            manifest.digest_for_tag("latest").unwrap_err(),
            ManifestError::Malformed { .. }
        ));
    }
}

use serde::{Deserialize, Serialize};

use crate::version::strip_tag_prefix;

/// Represents a downloadable release asset
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct ReleaseAsset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// The latest published release as described by the feed
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
pub struct ReleaseDescriptor {
    pub tag_name: String,
    pub html_url: String,
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseDescriptor {
    /// The tag without its conventional `v` prefix.
    pub fn latest_version(&self) -> &str {
        strip_tag_prefix(&self.tag_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_release() {
        let json = r#"{
            "tag_name": "v1.3.0",
            "html_url": "https://github.com/o/r/releases/tag/v1.3.0",
            "name": "Release 1.3.0",
            "prerelease": false,
            "assets": [
                {"name": "quicklaunch-firefox.zip", "size": 1024, "browser_download_url": "https://dl/ff.zip"}
            ]
        }"#;

        let release: ReleaseDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "v1.3.0");
        assert_eq!(release.latest_version(), "1.3.0");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].download_url, "https://dl/ff.zip");
    }

    #[test]
    fn test_deserialize_missing_field_fails() {
        let json = r#"{"tag_name": "v1.0.0", "assets": []}"#;
        assert!(serde_json::from_str::<ReleaseDescriptor>(json).is_err());

        let json = r#"{"tag_name": "v1.0.0", "html_url": "u", "assets": [{"name": "a.zip"}]}"#;
        assert!(serde_json::from_str::<ReleaseDescriptor>(json).is_err());
    }

    #[test]
    fn test_latest_version_without_prefix() {
        let release = ReleaseDescriptor {
            tag_name: "2.0".into(),
            ..Default::default()
        };
        assert_eq!(release.latest_version(), "2.0");
    }
}

use crate::feed::ReleaseAsset;
use crate::host::HostProfile;

/// Trait for selecting an asset from a list of available assets
pub trait AssetPicker: Send + Sync {
    /// Pick the asset to offer from the given list
    ///
    /// Returns `None` if no suitable asset is found
    fn pick<'a>(&self, assets: &'a [ReleaseAsset]) -> Option<&'a ReleaseAsset>;
}

/// Picks the packaged extension built for one host environment.
///
/// An asset qualifies when its lowercased name contains the environment
/// token and ends with `.zip`. The first qualifying asset in feed order
/// wins; there is no ranking.
pub struct ExtensionAssetPicker {
    token: String,
}

impl ExtensionAssetPicker {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into().to_lowercase(),
        }
    }

    pub fn for_profile(profile: &HostProfile) -> Self {
        Self::new(profile.asset_token)
    }

    fn matches(&self, name: &str) -> bool {
        let name_lower = name.to_lowercase();
        name_lower.contains(&self.token) && name_lower.ends_with(".zip")
    }
}

impl AssetPicker for ExtensionAssetPicker {
    fn pick<'a>(&self, assets: &'a [ReleaseAsset]) -> Option<&'a ReleaseAsset> {
        assets.iter().find(|a| self.matches(&a.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostEnvironment;

    fn make_asset(name: &str) -> ReleaseAsset {
        ReleaseAsset {
            name: name.to_string(),
            download_url: format!("https://example.com/{}", name),
        }
    }

    #[test]
    fn test_picks_matching_environment() {
        let assets = vec![
            make_asset("app-firefox-update.zip"),
            make_asset("app-chrome-update.zip"),
        ];

        let firefox = ExtensionAssetPicker::for_profile(&HostEnvironment::Firefox.profile().unwrap());
        assert_eq!(firefox.pick(&assets).unwrap().name, "app-firefox-update.zip");

        let chrome = ExtensionAssetPicker::for_profile(&HostEnvironment::Chrome.profile().unwrap());
        assert_eq!(chrome.pick(&assets).unwrap().name, "app-chrome-update.zip");
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let assets = vec![
            make_asset("App-Chrome-Update.zip"),
            make_asset("App-FIREFOX-Update.ZIP"),
        ];

        let picker = ExtensionAssetPicker::new("firefox");
        assert_eq!(picker.pick(&assets).unwrap().name, "App-FIREFOX-Update.ZIP");
    }

    #[test]
    fn test_requires_zip_extension() {
        let assets = vec![
            make_asset("app-firefox.xpi"),
            make_asset("app-firefox.zip.sha256"),
        ];

        let picker = ExtensionAssetPicker::new("firefox");
        assert!(picker.pick(&assets).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let assets = vec![
            make_asset("notes.txt"),
            make_asset("chrome-v2.zip"),
            make_asset("chrome-v2-alt.zip"),
        ];

        let picker = ExtensionAssetPicker::new("chrome");
        assert_eq!(picker.pick(&assets).unwrap().name, "chrome-v2.zip");
    }

    #[test]
    fn test_empty_assets() {
        let picker = ExtensionAssetPicker::new("chrome");
        assert!(picker.pick(&[]).is_none());
    }
}

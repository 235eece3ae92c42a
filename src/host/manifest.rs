//! [`HostRuntime`] backed by an unpacked extension's `manifest.json`.

use anyhow::{Context, Result, anyhow};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{HostEnvironment, HostRuntime, Namespace};

#[derive(Deserialize, Debug, Clone)]
struct Manifest {
    version: String,
    #[serde(default)]
    browser_specific_settings: Option<serde_json::Value>,
    /// Legacy spelling of `browser_specific_settings`
    #[serde(default)]
    applications: Option<serde_json::Value>,
}

impl Manifest {
    fn targets_gecko(&self) -> bool {
        [&self.browser_specific_settings, &self.applications]
            .into_iter()
            .flatten()
            .any(|settings| settings.get("gecko").is_some())
    }
}

pub struct ManifestRuntime {
    manifest: Manifest,
    forced: Option<HostEnvironment>,
}

impl ManifestRuntime {
    /// Load `manifest.json` from an extension directory or a direct path.
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let path = manifest_path(path);
        debug!("Reading extension manifest from {:?}", path);

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read manifest at {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Invalid manifest at {:?}", path))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(content).context("Failed to parse manifest JSON")?;
        Ok(Self {
            manifest,
            forced: None,
        })
    }

    /// Pretend to run under `environment` regardless of what the manifest
    /// targets.
    pub fn with_environment(mut self, environment: HostEnvironment) -> Self {
        self.forced = Some(environment);
        self
    }
}

fn manifest_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join("manifest.json")
    } else {
        path.to_path_buf()
    }
}

impl HostRuntime for ManifestRuntime {
    fn has_namespace(&self, namespace: Namespace) -> bool {
        match (self.forced, namespace) {
            (Some(HostEnvironment::Unknown), _) => false,
            (Some(HostEnvironment::Firefox), _) => true,
            (Some(HostEnvironment::Chrome), Namespace::Browser) => false,
            (Some(HostEnvironment::Chrome), Namespace::Chrome) => true,
            (None, Namespace::Browser) => self.manifest.targets_gecko(),
            (None, Namespace::Chrome) => true,
        }
    }

    fn manifest_version(&self, namespace: Namespace) -> Result<String> {
        if !self.has_namespace(namespace) {
            return Err(anyhow!("Runtime namespace '{}' is not available", namespace));
        }
        Ok(self.manifest.version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CHROME_MANIFEST: &str = r#"{
        "manifest_version": 3,
        "name": "Quick Launch",
        "version": "1.2.0"
    }"#;

    const FIREFOX_MANIFEST: &str = r#"{
        "manifest_version": 2,
        "name": "Quick Launch",
        "version": "1.1.0",
        "browser_specific_settings": { "gecko": { "id": "quicklaunch@example.com" } }
    }"#;

    #[test]
    fn test_chrome_manifest() {
        let runtime = ManifestRuntime::from_json(CHROME_MANIFEST).unwrap();
        assert!(!runtime.has_namespace(Namespace::Browser));
        assert!(runtime.has_namespace(Namespace::Chrome));
        assert_eq!(HostEnvironment::detect(&runtime), HostEnvironment::Chrome);
        assert_eq!(runtime.manifest_version(Namespace::Chrome).unwrap(), "1.2.0");
        assert!(runtime.manifest_version(Namespace::Browser).is_err());
    }

    #[test]
    fn test_firefox_manifest() {
        let runtime = ManifestRuntime::from_json(FIREFOX_MANIFEST).unwrap();
        assert_eq!(HostEnvironment::detect(&runtime), HostEnvironment::Firefox);
        assert_eq!(runtime.manifest_version(Namespace::Browser).unwrap(), "1.1.0");
    }

    #[test]
    fn test_legacy_applications_key() {
        let runtime = ManifestRuntime::from_json(
            r#"{"version": "0.9", "applications": {"gecko": {"id": "x@y"}}}"#,
        )
        .unwrap();
        assert_eq!(HostEnvironment::detect(&runtime), HostEnvironment::Firefox);
    }

    #[test]
    fn test_forced_environment() {
        let runtime = ManifestRuntime::from_json(CHROME_MANIFEST)
            .unwrap()
            .with_environment(HostEnvironment::Firefox);
        assert_eq!(HostEnvironment::detect(&runtime), HostEnvironment::Firefox);

        let runtime = ManifestRuntime::from_json(FIREFOX_MANIFEST)
            .unwrap()
            .with_environment(HostEnvironment::Chrome);
        assert_eq!(HostEnvironment::detect(&runtime), HostEnvironment::Chrome);

        let runtime = ManifestRuntime::from_json(CHROME_MANIFEST)
            .unwrap()
            .with_environment(HostEnvironment::Unknown);
        assert_eq!(HostEnvironment::detect(&runtime), HostEnvironment::Unknown);
    }

    #[test]
    fn test_missing_version_fails() {
        assert!(ManifestRuntime::from_json(r#"{"name": "x"}"#).is_err());
    }

    #[test]
    fn test_load_from_directory_and_file() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("manifest.json");
        std::fs::write(&manifest, FIREFOX_MANIFEST).unwrap();

        let from_dir = ManifestRuntime::load(dir.path()).unwrap();
        assert_eq!(from_dir.manifest_version(Namespace::Browser).unwrap(), "1.1.0");

        let from_file = ManifestRuntime::load(&manifest).unwrap();
        assert_eq!(from_file.manifest_version(Namespace::Chrome).unwrap(), "1.1.0");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = ManifestRuntime::load(dir.path()).err().unwrap();
        assert!(err.to_string().contains("Failed to read manifest"));
    }
}

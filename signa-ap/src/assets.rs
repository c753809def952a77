//! Animation asset resolution
//!
//! The scheduler asks for an asset by key and gets back either a loaded asset
//! with a declared duration, or a failure. Only the not-found/found split
//! matters to the fallback chain; every failure is handled the same way.
//!
//! On disk, assets live under the assets directory as
//! `signs/<LABEL>.<ext>` and `letters/<LETTER>.<ext>`. Durations come from an
//! optional `durations.toml` next to them:
//!
//! ```toml
//! [signs]
//! HELLO = 1200
//!
//! [letters]
//! A = 600
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use signa_common::events::CueSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Name of the optional duration manifest inside the assets directory
pub const DURATION_MANIFEST: &str = "durations.toml";

/// Identifies one requested animation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetKey {
    /// Whole-sign animation named after a gloss label
    Sign(String),
    /// Finger-spelling animation for one letter
    Letter(String),
}

impl AssetKey {
    pub fn name(&self) -> &str {
        match self {
            AssetKey::Sign(name) | AssetKey::Letter(name) => name,
        }
    }

    fn dir(&self) -> &'static str {
        match self {
            AssetKey::Sign(_) => "signs",
            AssetKey::Letter(_) => "letters",
        }
    }

    /// Path relative to the assets directory, `/`-separated
    pub fn relative_path(&self, extension: &str) -> String {
        format!("{}/{}.{}", self.dir(), self.name(), extension)
    }

    pub fn cue_source(&self) -> CueSource {
        match self {
            AssetKey::Sign(_) => CueSource::Sign,
            AssetKey::Letter(_) => CueSource::Letter,
        }
    }

    /// Names must stay inside their directory
    fn is_safe_name(&self) -> bool {
        let name = self.name();
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(|c: char| c == '/' || c == '\\')
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.dir(), self.name())
    }
}

/// Loaded animation with its declared duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationAsset {
    pub key: AssetKey,
    /// Path relative to the assets directory, as served to the renderer
    pub path: String,
    pub duration: Duration,
}

/// Asset load failure
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(AssetKey),

    #[error("Failed to load asset {key}: {source}")]
    Io {
        key: AssetKey,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::NotFound(_))
    }
}

/// Seam to the rendering subsystem's asset store
#[async_trait]
pub trait AssetResolver: Send + Sync {
    async fn load(&self, key: &AssetKey) -> Result<AnimationAsset, AssetError>;
}

#[derive(Debug, Default, Deserialize)]
struct DurationManifest {
    #[serde(default)]
    signs: HashMap<String, u64>,
    #[serde(default)]
    letters: HashMap<String, u64>,
}

/// Filesystem-backed asset resolver
#[derive(Debug, Clone)]
pub struct FsAssetResolver {
    assets_dir: PathBuf,
    extension: String,
    default_duration: Duration,
    durations: HashMap<AssetKey, Duration>,
}

impl FsAssetResolver {
    /// Create a resolver, reading `durations.toml` when present
    ///
    /// A missing assets directory is not fatal: every lookup then falls back
    /// to the placeholder. A malformed manifest is a startup error.
    pub fn new(
        assets_dir: impl Into<PathBuf>,
        extension: impl Into<String>,
        default_duration: Duration,
    ) -> crate::Result<Self> {
        let assets_dir = assets_dir.into();
        let extension = extension.into().trim_start_matches('.').to_string();

        if !assets_dir.is_dir() {
            warn!(
                "Assets directory {} does not exist; all cues will use placeholders",
                assets_dir.display()
            );
        }

        let durations = Self::load_manifest(&assets_dir)?;
        info!(
            "Asset resolver ready: {} ({} declared durations)",
            assets_dir.display(),
            durations.len()
        );

        Ok(Self {
            assets_dir,
            extension,
            default_duration,
            durations,
        })
    }

    fn load_manifest(assets_dir: &Path) -> crate::Result<HashMap<AssetKey, Duration>> {
        let path = assets_dir.join(DURATION_MANIFEST);
        if !path.is_file() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let manifest: DurationManifest = toml::from_str(&content).map_err(|e| {
            crate::Error::Config(format!("Invalid duration manifest {}: {}", path.display(), e))
        })?;

        let signs = manifest
            .signs
            .into_iter()
            .map(|(name, ms)| (AssetKey::Sign(name), Duration::from_millis(ms)));
        let letters = manifest
            .letters
            .into_iter()
            .map(|(name, ms)| (AssetKey::Letter(name), Duration::from_millis(ms)));

        Ok(signs.chain(letters).collect())
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    fn duration_for(&self, key: &AssetKey) -> Duration {
        self.durations
            .get(key)
            .copied()
            .unwrap_or(self.default_duration)
    }
}

#[async_trait]
impl AssetResolver for FsAssetResolver {
    async fn load(&self, key: &AssetKey) -> Result<AnimationAsset, AssetError> {
        if !key.is_safe_name() {
            debug!("Rejecting unsafe asset name {:?}", key.name());
            return Err(AssetError::NotFound(key.clone()));
        }

        let relative = key.relative_path(&self.extension);
        let path = self.assets_dir.join(&relative);

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(AnimationAsset {
                key: key.clone(),
                path: relative,
                duration: self.duration_for(key),
            }),
            Ok(_) => Err(AssetError::NotFound(key.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(key.clone()))
            }
            Err(e) => Err(AssetError::Io {
                key: key.clone(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn assets_fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("signs")).unwrap();
        std::fs::create_dir_all(dir.path().join("letters")).unwrap();
        std::fs::write(dir.path().join("signs/HELLO.glb"), b"glTF").unwrap();
        std::fs::write(dir.path().join("letters/A.glb"), b"glTF").unwrap();
        std::fs::write(
            dir.path().join(DURATION_MANIFEST),
            "[signs]\nHELLO = 1200\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(AssetKey::Sign("HELLO".into()).relative_path("glb"), "signs/HELLO.glb");
        assert_eq!(AssetKey::Letter("A".into()).relative_path("fbx"), "letters/A.fbx");
    }

    #[tokio::test]
    async fn test_load_found_with_manifest_duration() {
        let dir = assets_fixture();
        let resolver = FsAssetResolver::new(dir.path(), ".glb", Duration::from_millis(900)).unwrap();

        let asset = resolver.load(&AssetKey::Sign("HELLO".into())).await.unwrap();
        assert_eq!(asset.path, "signs/HELLO.glb");
        assert_eq!(asset.duration, Duration::from_millis(1200));

        let letter = resolver.load(&AssetKey::Letter("A".into())).await.unwrap();
        assert_eq!(letter.duration, Duration::from_millis(900));
    }

    #[tokio::test]
    async fn test_load_not_found() {
        let dir = assets_fixture();
        let resolver = FsAssetResolver::new(dir.path(), "glb", Duration::from_millis(900)).unwrap();

        let err = resolver.load(&AssetKey::Sign("WORLD".into())).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unsafe_names_rejected() {
        let dir = assets_fixture();
        let resolver = FsAssetResolver::new(dir.path(), "glb", Duration::from_millis(900)).unwrap();

        for name in ["../signs/HELLO", "..", "a/b", ""] {
            let err = resolver.load(&AssetKey::Sign(name.into())).await.unwrap_err();
            assert!(err.is_not_found(), "{:?} should be rejected", name);
        }
    }

    #[tokio::test]
    async fn test_missing_assets_dir_is_not_fatal() {
        let resolver =
            FsAssetResolver::new("/nonexistent/signa/assets", "glb", Duration::from_millis(900)).unwrap();
        assert!(resolver.load(&AssetKey::Letter("A".into())).await.is_err());
    }

    #[test]
    fn test_invalid_manifest_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DURATION_MANIFEST), "[signs]\nHELLO = \"long\"\n").unwrap();
        assert!(FsAssetResolver::new(dir.path(), "glb", Duration::from_millis(900)).is_err());
    }
}

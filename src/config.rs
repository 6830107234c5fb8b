/// Library configuration
///
/// Stored as JSON next to the library (or anywhere the caller chooses).
/// Everything has a sensible default so a missing config file just means
/// "stock settings".

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths::StorageRoot;

/// Configuration for the clip library.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VlogConfig {
    /// Storage root override. None = platform data directory.
    pub storage_root: Option<PathBuf>,

    /// Side length of generated thumbnails in pixels.
    pub thumbnail_size: u32,

    /// Container extension the recorder writes (without the dot).
    pub clip_extension: String,
}

impl Default for VlogConfig {
    fn default() -> Self {
        VlogConfig {
            storage_root: None,
            thumbnail_size: 200,
            clip_extension: "mov".to_string(),
        }
    }
}

impl VlogConfig {
    /// Resolve the storage root: the configured override, or the platform
    /// default location.
    pub fn storage_root(&self) -> Option<StorageRoot> {
        match &self.storage_root {
            Some(path) => Some(StorageRoot::new(path.clone())),
            None => StorageRoot::discover(),
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a config file, falling back to defaults if it does not exist
    /// or cannot be parsed (a broken config file is reported, not fatal).
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("⚠️  Ignoring bad config {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save the config as JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = VlogConfig::default();
        assert_eq!(config.thumbnail_size, 200);
        assert_eq!(config.clip_extension, "mov");
        assert!(config.storage_root.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = VlogConfig::default();
        config.storage_root = Some(PathBuf::from("/tmp/vlog"));
        config.thumbnail_size = 256;

        let json = config.to_json().unwrap();
        let restored = VlogConfig::from_json(&json).unwrap();

        assert_eq!(config, restored);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = VlogConfig::load_or_default(Path::new("/nonexistent/config.json"));
        assert_eq!(config, VlogConfig::default());
    }
}

/// Single source of truth for where clips and thumbnails live on disk.
///
/// The on-disk layout is two sibling directories under one storage root:
/// - `vlog_clips/`  — video files named `<timestamp>.<ext>`
/// - `thumbnails/`  — image files named `<timestamp>_thumbnail.jpg`
///
/// This naming contract is the only persistent format the core preserves.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Directory name for recorded clips under the storage root.
pub const CLIPS_DIR: &str = "vlog_clips";

/// Directory name for cached thumbnails under the storage root.
pub const THUMBNAILS_DIR: &str = "thumbnails";

/// Filename timestamp format: zero-padded and fixed-width, so that
/// lexicographic filename order equals chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// The storage root for the whole clip library.
///
/// Constructed explicitly and passed to `ClipStore` / `ThumbnailCache`
/// rather than reached for through an ambient singleton, so tests can
/// point the entire pipeline at a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRoot {
    root: PathBuf,
}

impl StorageRoot {
    /// Wrap an explicit root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        StorageRoot { root: root.into() }
    }

    /// Resolve the default storage root in the user's data directory:
    /// - Linux: ~/.local/share/vlog-clips
    /// - macOS: ~/Library/Application Support/vlog-clips
    /// - Windows: %APPDATA%\vlog-clips
    pub fn discover() -> Option<Self> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("vlog-clips");
        Some(StorageRoot { root: path })
    }

    /// The root path itself.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Directory holding recorded clip files.
    pub fn clips_dir(&self) -> PathBuf {
        self.root.join(CLIPS_DIR)
    }

    /// Directory holding cached thumbnail files.
    pub fn thumbnails_dir(&self) -> PathBuf {
        self.root.join(THUMBNAILS_DIR)
    }
}

/// Format a clip filename for a recording finished at `at`.
///
/// The recorder collaborator must name every clip through this function;
/// `ClipStore` sorts by filename, which is only chronological because the
/// format here is fixed-width.
pub fn clip_filename(at: NaiveDateTime, extension: &str) -> String {
    format!("{}.{}", at.format(TIMESTAMP_FORMAT), extension)
}

/// Parse the recording timestamp back out of a clip filename stem.
/// Returns None for files that were not named by `clip_filename`.
pub fn parse_clip_timestamp(stem: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(stem, TIMESTAMP_FORMAT).ok()
}

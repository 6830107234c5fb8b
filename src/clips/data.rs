/// Shared data structures for the clip library
///
/// These structs represent the data model that flows between the storage
/// layer and the gallery.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

use crate::paths;

/// A single recorded video clip in the clips directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    /// Full path to the clip file
    pub path: PathBuf,
    /// Filename only (e.g., "2024_01_02_15_04_05.mov")
    pub filename: String,
    /// Recording time parsed from the filename; None if the file was not
    /// named by the recorder's timestamp formatter
    pub recorded_at: Option<NaiveDateTime>,
}

impl Clip {
    /// Build a Clip from a file path, parsing the timestamp out of the
    /// filename stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let recorded_at = path
            .file_stem()
            .and_then(|stem| paths::parse_clip_timestamp(&stem.to_string_lossy()));
        Clip {
            path,
            filename,
            recorded_at,
        }
    }

    /// Whether this path carries the given clip extension (case-insensitive).
    pub fn has_extension(path: &Path, extension: &str) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
            .unwrap_or(false)
    }
}

/// ClipStore: enumerates, orders, and deletes clip files.
///
/// Ordering policy: lexicographic filename sort. This equals chronological
/// order only because every recorder-written filename uses the fixed-width
/// timestamp format in `paths::TIMESTAMP_FORMAT`; files named any other way
/// still list, but sort wherever their name falls.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::data::Clip;
use crate::paths::StorageRoot;

/// Errors from clip storage operations.
#[derive(Debug, Error)]
pub enum ClipStoreError {
    #[error("clips directory {path} could not be read")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no clip at {0}")]
    NotFound(PathBuf),

    #[error("could not delete clip {path}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not create directory {path}")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Create a directory if it does not already exist (idempotent).
///
/// Deliberately non-recursive: the storage root itself must exist; a
/// missing root is a setup problem this layer should not paper over.
pub fn ensure_directory(path: &Path) -> Result<(), ClipStoreError> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(ClipStoreError::DirectoryCreateFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Storage for recorded clips in the clips directory.
pub struct ClipStore {
    clips_dir: PathBuf,
    clip_extension: String,
}

impl ClipStore {
    /// Open the store for a storage root, creating the clips directory if
    /// it is absent.
    pub fn open(root: &StorageRoot, clip_extension: &str) -> Result<Self, ClipStoreError> {
        let clips_dir = root.clips_dir();
        ensure_directory(&clips_dir)?;
        Ok(ClipStore {
            clips_dir,
            clip_extension: clip_extension.to_string(),
        })
    }

    /// The directory this store reads from.
    pub fn clips_dir(&self) -> &Path {
        &self.clips_dir
    }

    /// List all clips, sorted by filename ascending (chronological order
    /// for recorder-named files).
    pub fn list_clips(&self) -> Result<Vec<Clip>, ClipStoreError> {
        // walkdir at depth 1: the clips directory is flat by contract.
        let mut clips = Vec::new();
        for entry in WalkDir::new(&self.clips_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|err| {
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
                ClipStoreError::StorageUnavailable {
                    path: self.clips_dir.clone(),
                    source,
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if !Clip::has_extension(entry.path(), &self.clip_extension) {
                continue;
            }
            clips.push(Clip::from_path(entry.path()));
        }

        clips.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(clips)
    }

    /// Remove the clip file at `path`.
    ///
    /// The corresponding thumbnail is left alone; cascading is the
    /// gallery's job.
    pub fn delete_clip(&self, path: &Path) -> Result<(), ClipStoreError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(ClipStoreError::NotFound(path.to_path_buf()))
            }
            Err(source) => Err(ClipStoreError::DeleteFailed {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

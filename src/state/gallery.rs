/// ClipGallery: the browse/preview/delete state machine
///
/// Composes ClipStore and ThumbnailCache into an ordered list of
/// (clip, preview) entries, and tracks which clip (if any) is open in the
/// preview. Playback itself is an external collaborator: select() hands
/// back the clip so the caller can feed it to a player.

use image::RgbImage;
use thiserror::Error;

use crate::clips::data::Clip;
use crate::clips::store::{ClipStore, ClipStoreError};
use crate::thumbs::cache::ThumbnailCache;

/// Errors from gallery operations.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("no clip is selected")]
    NoSelection,

    #[error(transparent)]
    Store(#[from] ClipStoreError),
}

/// What the user currently has open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Browsing the grid, nothing open
    Idle,
    /// Previewing the entry at this index
    Previewing(usize),
}

/// One cell of the gallery grid.
pub struct GalleryEntry {
    pub clip: Clip,
    pub preview: RgbImage,
}

/// Ordered clip gallery with single-selection preview state.
pub struct ClipGallery {
    store: ClipStore,
    thumbs: ThumbnailCache,
    entries: Vec<GalleryEntry>,
    selection: Selection,
}

impl ClipGallery {
    pub fn new(store: ClipStore, thumbs: ThumbnailCache) -> Self {
        ClipGallery {
            store,
            thumbs,
            entries: Vec::new(),
            selection: Selection::Idle,
        }
    }

    /// Rebuild the entry list: clips in chronological order, each paired
    /// with its cached thumbnail (placeholder where none exists yet).
    ///
    /// Listing failures degrade to an empty gallery with the error
    /// reported; the grid never crashes over a broken directory. Any
    /// selection is dropped because indices may have shifted.
    pub fn refresh(&mut self) -> &[GalleryEntry] {
        let clips = match self.store.list_clips() {
            Ok(clips) => clips,
            Err(err) => {
                eprintln!("⚠️  Clip listing failed: {err}");
                Vec::new()
            }
        };

        let mut entries = Vec::with_capacity(clips.len());
        for clip in clips {
            let preview = self.thumbs.load(&clip.path);
            entries.push(GalleryEntry { clip, preview });
        }

        self.entries = entries;
        self.selection = Selection::Idle;
        &self.entries
    }

    /// Current entries, in the order of the last refresh().
    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Open the entry at `index` for preview and return its clip for
    /// hand-off to the player. Out-of-range indices leave the state
    /// unchanged and return None.
    pub fn select(&mut self, index: usize) -> Option<&Clip> {
        if index >= self.entries.len() {
            return None;
        }
        self.selection = Selection::Previewing(index);
        Some(&self.entries[index].clip)
    }

    /// Close the preview.
    pub fn dismiss(&mut self) {
        self.selection = Selection::Idle;
    }

    /// Delete the clip currently open in the preview, cascade-delete its
    /// thumbnail, and rebuild the gallery.
    pub fn delete_selected(&mut self) -> Result<(), GalleryError> {
        let Selection::Previewing(index) = self.selection else {
            return Err(GalleryError::NoSelection);
        };
        let clip_path = self.entries[index].clip.path.clone();

        self.store.delete_clip(&clip_path)?;
        self.thumbs.remove(&clip_path);

        self.selection = Selection::Idle;
        self.refresh();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::StorageRoot;
    use crate::thumbs::decode::StillFrameSource;
    use std::fs;
    use tempfile::tempdir;

    fn gallery_in(dir: &std::path::Path) -> ClipGallery {
        let root = StorageRoot::new(dir);
        let store = ClipStore::open(&root, "mov").unwrap();
        let thumbs = ThumbnailCache::new(&root, Box::new(StillFrameSource), 200).unwrap();
        ClipGallery::new(store, thumbs)
    }

    #[test]
    fn test_select_and_dismiss() {
        let temp = tempdir().unwrap();
        let mut gallery = gallery_in(temp.path());
        fs::write(
            temp.path().join("vlog_clips/2024_01_01_00_00_00.mov"),
            b"clip",
        )
        .unwrap();
        gallery.refresh();

        assert_eq!(gallery.selection(), Selection::Idle);

        let clip = gallery.select(0).unwrap();
        assert_eq!(clip.filename, "2024_01_01_00_00_00.mov");
        assert_eq!(gallery.selection(), Selection::Previewing(0));

        gallery.dismiss();
        assert_eq!(gallery.selection(), Selection::Idle);
    }

    #[test]
    fn test_select_out_of_range_is_none() {
        let temp = tempdir().unwrap();
        let mut gallery = gallery_in(temp.path());
        gallery.refresh();

        assert!(gallery.select(0).is_none());
        assert_eq!(gallery.selection(), Selection::Idle);
    }

    #[test]
    fn test_delete_without_selection_fails_and_mutates_nothing() {
        let temp = tempdir().unwrap();
        let mut gallery = gallery_in(temp.path());
        let clip_path = temp.path().join("vlog_clips/2024_01_01_00_00_00.mov");
        fs::write(&clip_path, b"clip").unwrap();
        gallery.refresh();

        match gallery.delete_selected() {
            Err(GalleryError::NoSelection) => {}
            other => panic!("expected NoSelection, got {:?}", other.is_ok()),
        }
        assert!(clip_path.exists());
        assert_eq!(gallery.entries().len(), 1);
    }

    #[test]
    fn test_refresh_survives_missing_clips_dir() {
        let temp = tempdir().unwrap();
        let mut gallery = gallery_in(temp.path());
        fs::remove_dir(temp.path().join("vlog_clips")).unwrap();

        assert!(gallery.refresh().is_empty());
        assert_eq!(gallery.selection(), Selection::Idle);
    }
}

/// vlog-clips: clip library and thumbnail pipeline
///
/// This crate is the storage core of a personal video-vlogging app:
/// - Clip enumeration, chronological ordering, and deletion (clips/)
/// - Square thumbnail generation and caching (thumbs/)
/// - Gallery state: ordered (clip, preview) pairs plus selection (state/)
///
/// Camera capture, recording/export, and playback are external
/// collaborators: the recorder drops finished clip files into the clips
/// directory and calls `ThumbnailCache::generate`; the player receives a
/// clip path from `ClipGallery::select`.

pub mod clips;
pub mod config;
pub mod paths;
pub mod state;
pub mod thumbs;

// Re-export the main public API so callers get short import paths.
pub use clips::data::Clip;
pub use clips::store::{ClipStore, ClipStoreError};
pub use config::VlogConfig;
pub use paths::StorageRoot;
pub use state::gallery::{ClipGallery, GalleryEntry, GalleryError, Selection};
pub use thumbs::cache::{ThumbnailCache, ThumbnailError};
pub use thumbs::decode::{FrameSource, StillFrameSource};

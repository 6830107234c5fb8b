/// ThumbnailCache: square preview images for clips
///
/// One thumbnail per clip, addressed by a pure function of the clip path
/// (same stem, `_thumbnail` suffix, `.jpg`) — no index or database.
/// Generation failures degrade to a solid-color placeholder so the gallery
/// never shows an empty cell.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::crop::preview_rect;
use super::decode::FrameSource;
use crate::clips::store::{self, ClipStoreError};
use crate::paths::StorageRoot;

/// Suffix appended to the clip stem to form the thumbnail filename.
const THUMBNAIL_SUFFIX: &str = "_thumbnail";

/// JPEG quality for thumbnails (the originals stay on disk anyway).
const JPEG_QUALITY: u8 = 50;

/// Placeholder fill when no frame can be decoded: brown.
const PLACEHOLDER_COLOR: Rgb<u8> = Rgb([153, 102, 51]);

/// Errors from thumbnail generation.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("could not decode a frame from {path}: {reason}")]
    DecodeFailed { path: PathBuf, reason: String },

    #[error("could not encode thumbnail image")]
    EncodeFailed(#[from] image::ImageError),

    #[error("could not write thumbnail to {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Generates, persists, and retrieves square clip thumbnails.
pub struct ThumbnailCache {
    thumbnails_dir: PathBuf,
    frames: Box<dyn FrameSource>,
    dimensions: u32,
}

impl ThumbnailCache {
    /// Open the cache for a storage root, creating the thumbnails
    /// directory if it is absent. The frame source is injected so callers
    /// (and tests) choose how first frames are decoded.
    pub fn new(
        root: &StorageRoot,
        frames: Box<dyn FrameSource>,
        dimensions: u32,
    ) -> Result<Self, ClipStoreError> {
        let thumbnails_dir = root.thumbnails_dir();
        store::ensure_directory(&thumbnails_dir)?;
        Ok(ThumbnailCache {
            thumbnails_dir,
            frames,
            dimensions,
        })
    }

    /// Side length of generated thumbnails.
    pub fn dimensions(&self) -> u32 {
        self.dimensions
    }

    /// Derive the thumbnail path for a clip. Pure: same clip path in,
    /// same thumbnail path out, no filesystem access.
    pub fn thumbnail_path(&self, clip_path: &Path) -> PathBuf {
        let stem = clip_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.thumbnails_dir
            .join(format!("{stem}{THUMBNAIL_SUFFIX}.jpg"))
    }

    /// Generate and persist the thumbnail for a clip.
    ///
    /// Decode and crop failures fall back to the placeholder (reported,
    /// then written like any other thumbnail); encode and write failures
    /// are returned to the caller.
    pub fn generate(&self, clip_path: &Path) -> Result<PathBuf, ThumbnailError> {
        let image = match self.render_preview(clip_path) {
            Ok(image) => image,
            Err(err) => {
                eprintln!("⚠️  Thumbnail fallback for {}: {}", clip_path.display(), err);
                self.placeholder()
            }
        };

        let out = self.thumbnail_path(clip_path);
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode_image(&image)?;
        fs::write(&out, &jpeg).map_err(|source| ThumbnailError::WriteFailed {
            path: out.clone(),
            source,
        })?;

        println!("📸 Saved thumbnail at {}", out.display());
        Ok(out)
    }

    /// Load the cached thumbnail for a clip; placeholder if absent or
    /// unreadable. Never an error: the gallery always gets an image.
    pub fn load(&self, clip_path: &Path) -> RgbImage {
        let path = self.thumbnail_path(clip_path);
        match image::ImageReader::open(&path)
            .and_then(|r| r.with_guessed_format())
            .map_err(image::ImageError::IoError)
            .and_then(|r| r.decode())
        {
            Ok(decoded) => decoded.to_rgb8(),
            Err(_) => self.placeholder(),
        }
    }

    /// Best-effort cascade delete of a clip's thumbnail. Absent files are
    /// fine (the thumbnail may never have been generated); other failures
    /// are reported and the orphan left behind.
    pub fn remove(&self, clip_path: &Path) {
        let path = self.thumbnail_path(clip_path);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                eprintln!("⚠️  Could not remove thumbnail {}: {}", path.display(), err);
            }
        }
    }

    /// Solid-color stand-in at thumbnail dimensions.
    pub fn placeholder(&self) -> RgbImage {
        RgbImage::from_pixel(self.dimensions, self.dimensions, PLACEHOLDER_COLOR)
    }

    /// First frame → centered square crop → thumbnail-sized image.
    fn render_preview(&self, clip_path: &Path) -> Result<RgbImage, ThumbnailError> {
        let frame = self.frames.first_frame(clip_path)?;
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(ThumbnailError::DecodeFailed {
                path: clip_path.to_path_buf(),
                reason: format!("empty frame ({width}x{height})"),
            });
        }

        let rect = preview_rect(width, height);
        let square = imageops::crop_imm(&frame, rect.x, rect.y, rect.side, rect.side).to_image();
        Ok(imageops::resize(
            &square,
            self.dimensions,
            self.dimensions,
            FilterType::Lanczos3,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbs::decode::StillFrameSource;
    use tempfile::tempdir;

    fn cache_in(dir: &Path) -> ThumbnailCache {
        ThumbnailCache::new(&StorageRoot::new(dir), Box::new(StillFrameSource), 200).unwrap()
    }

    #[test]
    fn test_thumbnail_path_is_deterministic() {
        let temp = tempdir().unwrap();
        let cache = cache_in(temp.path());

        let clip = Path::new("/data/vlog_clips/2024_01_01_00_00_00.mov");
        let first = cache.thumbnail_path(clip);
        let second = cache.thumbnail_path(clip);

        assert_eq!(first, second);
        assert_eq!(
            first,
            temp.path()
                .join("thumbnails/2024_01_01_00_00_00_thumbnail.jpg")
        );

        let other = cache.thumbnail_path(Path::new("/data/vlog_clips/2024_01_02_00_00_00.mov"));
        assert_ne!(first, other);
    }

    #[test]
    fn test_generate_then_load_is_square_at_dimensions() {
        let temp = tempdir().unwrap();
        let cache = cache_in(temp.path());

        // Landscape "clip": a 300x100 still, so the crop path is exercised.
        let clip_path = temp.path().join("2024_01_01_00_00_00.mov");
        let frame = RgbImage::from_pixel(300, 100, Rgb([200, 40, 40]));
        frame
            .save_with_format(&clip_path, image::ImageFormat::Png)
            .unwrap();

        let thumb_path = cache.generate(&clip_path).unwrap();
        assert_eq!(thumb_path, cache.thumbnail_path(&clip_path));
        assert!(thumb_path.exists());

        let loaded = cache.load(&clip_path);
        assert_eq!(loaded.dimensions(), (200, 200));
    }

    #[test]
    fn test_generate_undecodable_clip_writes_placeholder() {
        let temp = tempdir().unwrap();
        let cache = cache_in(temp.path());

        let clip_path = temp.path().join("2024_01_01_00_00_00.mov");
        fs::write(&clip_path, b"not image data at all").unwrap();

        let thumb_path = cache.generate(&clip_path).unwrap();
        assert!(thumb_path.exists());

        let loaded = cache.load(&clip_path);
        assert_eq!(loaded.dimensions(), (200, 200));
        // JPEG is lossy; just check the fill is brown-ish, not black/white.
        let px = loaded.get_pixel(100, 100);
        assert!(px[0] > px[2], "expected warm placeholder fill, got {px:?}");
    }

    #[test]
    fn test_load_without_thumbnail_is_placeholder() {
        let temp = tempdir().unwrap();
        let cache = cache_in(temp.path());

        let loaded = cache.load(Path::new("/data/vlog_clips/2024_01_01_00_00_00.mov"));
        assert_eq!(loaded.dimensions(), (200, 200));
        assert_eq!(loaded.get_pixel(0, 0), &PLACEHOLDER_COLOR);
    }

    #[test]
    fn test_remove_tolerates_missing_thumbnail() {
        let temp = tempdir().unwrap();
        let cache = cache_in(temp.path());

        let clip = temp.path().join("2024_01_01_00_00_00.mov");
        cache.remove(&clip); // nothing generated yet

        fs::write(cache.thumbnail_path(&clip), b"stale").unwrap();
        cache.remove(&clip);
        assert!(!cache.thumbnail_path(&clip).exists());
    }
}

/// Thumbnail module
///
/// This module handles:
/// - Centered square-crop geometry (crop.rs)
/// - First-frame extraction behind the FrameSource seam (decode.rs)
/// - Generating, caching, and loading thumbnails (cache.rs)

pub mod cache;
pub mod crop;
pub mod decode;

/// Centered square-crop geometry
///
/// The same rect computation backs thumbnail generation and any live
/// square preview mask: crop to the smaller dimension, centered along the
/// larger one, so the result is 1:1 regardless of source aspect ratio.

/// A square crop region inside a source frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// Compute the centered square crop for a frame of `width` × `height`.
///
/// - Portrait  (w < h): w×w square, vertically centered
/// - Landscape (w > h): h×h square, horizontally centered
/// - Square    (w == h): the full frame
pub fn preview_rect(width: u32, height: u32) -> CropRect {
    if width < height {
        CropRect {
            x: 0,
            y: height / 2 - width / 2,
            side: width,
        }
    } else if width > height {
        CropRect {
            x: width / 2 - height / 2,
            y: 0,
            side: height,
        }
    } else {
        CropRect {
            x: 0,
            y: 0,
            side: width,
        }
    }
}

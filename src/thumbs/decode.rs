/// First-frame extraction behind the FrameSource seam
///
/// ThumbnailCache does not care where the frame pixels come from; it takes
/// a FrameSource at construction time. Two sources are provided:
/// - StillFrameSource: decodes the clip file through the image crate, for
///   still-image clips and for tests
/// - FfmpegFrameSource (feature "ffmpeg"): decodes the first video frame
///   of the container at timestamp 0

use image::RgbImage;
use std::path::Path;

use super::cache::ThumbnailError;

/// Source of the first frame of a clip, right-side-up.
///
/// Implementations must apply any orientation recorded in the source
/// media before returning the frame.
pub trait FrameSource {
    fn first_frame(&self, clip_path: &Path) -> Result<RgbImage, ThumbnailError>;
}

/// Decodes the clip file itself as a still image (format sniffed from
/// content, not extension). Useful on builds without the ffmpeg feature
/// and as the test decoder.
pub struct StillFrameSource;

impl FrameSource for StillFrameSource {
    fn first_frame(&self, clip_path: &Path) -> Result<RgbImage, ThumbnailError> {
        let decoded = image::ImageReader::open(clip_path)
            .map_err(|err| ThumbnailError::DecodeFailed {
                path: clip_path.to_path_buf(),
                reason: err.to_string(),
            })?
            .with_guessed_format()
            .map_err(|err| ThumbnailError::DecodeFailed {
                path: clip_path.to_path_buf(),
                reason: err.to_string(),
            })?
            .decode()
            .map_err(|err| ThumbnailError::DecodeFailed {
                path: clip_path.to_path_buf(),
                reason: err.to_string(),
            })?;
        Ok(decoded.to_rgb8())
    }
}

#[cfg(feature = "ffmpeg")]
pub use ffmpeg_source::FfmpegFrameSource;

#[cfg(feature = "ffmpeg")]
mod ffmpeg_source {
    use super::*;
    use std::path::PathBuf;

    use ffmpeg_the_third as ffmpeg;
    use ffmpeg::format::{input, Pixel};
    use ffmpeg::media::Type;
    use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};

    /// Extracts the first video frame of a clip in-process via FFmpeg.
    pub struct FfmpegFrameSource;

    impl FfmpegFrameSource {
        pub fn new() -> Result<Self, ThumbnailError> {
            ffmpeg::init().map_err(|err| ThumbnailError::DecodeFailed {
                path: PathBuf::new(),
                reason: format!("ffmpeg init: {err}"),
            })?;
            Ok(FfmpegFrameSource)
        }
    }

    fn decode_failed(path: &Path, reason: impl ToString) -> ThumbnailError {
        ThumbnailError::DecodeFailed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Rotate the frame per the stream's "rotate" metadata so the output
    /// is right-side-up (phone footage is usually stored sideways).
    fn apply_rotation(frame: RgbImage, degrees: i32) -> RgbImage {
        match degrees.rem_euclid(360) {
            90 => image::imageops::rotate90(&frame),
            180 => image::imageops::rotate180(&frame),
            270 => image::imageops::rotate270(&frame),
            _ => frame,
        }
    }

    impl FrameSource for FfmpegFrameSource {
        fn first_frame(&self, clip_path: &Path) -> Result<RgbImage, ThumbnailError> {
            let mut ictx =
                input(&clip_path.to_path_buf()).map_err(|e| decode_failed(clip_path, e))?;

            let (video_idx, rotation) = {
                let stream = ictx
                    .streams()
                    .best(Type::Video)
                    .ok_or_else(|| decode_failed(clip_path, "no video stream"))?;
                let rotation = stream
                    .metadata()
                    .get("rotate")
                    .and_then(|v| v.parse::<i32>().ok())
                    .unwrap_or(0);
                (stream.index(), rotation)
            };

            let parameters = ictx
                .stream(video_idx)
                .ok_or_else(|| decode_failed(clip_path, "video stream vanished"))?
                .parameters();
            let context = ffmpeg::codec::context::Context::from_parameters(parameters)
                .map_err(|e| decode_failed(clip_path, e))?;
            let mut decoder = context
                .decoder()
                .video()
                .map_err(|e| decode_failed(clip_path, e))?;

            let (w, h) = (decoder.width(), decoder.height());
            let mut scaler = SwsContext::get(
                decoder.format(), w, h,
                Pixel::RGB24, w, h,
                Flags::BILINEAR,
            )
            .map_err(|e| decode_failed(clip_path, e))?;

            for (stream, packet) in ictx.packets().flatten() {
                if stream.index() != video_idx {
                    continue;
                }
                if decoder.send_packet(&packet).is_err() {
                    continue;
                }
                let mut decoded = ffmpeg::util::frame::video::Video::empty();
                while decoder.receive_frame(&mut decoded).is_ok() {
                    let mut rgb = ffmpeg::util::frame::video::Video::empty();
                    if scaler.run(&decoded, &mut rgb).is_err() {
                        continue;
                    }
                    // Destripe: copy only visible pixels, not stride padding
                    let stride = rgb.stride(0);
                    let raw = rgb.data(0);
                    let row_bytes = w as usize * 3;
                    let data: Vec<u8> = (0..h as usize)
                        .flat_map(|row| &raw[row * stride..row * stride + row_bytes])
                        .copied()
                        .collect();
                    let frame = RgbImage::from_raw(w, h, data)
                        .ok_or_else(|| decode_failed(clip_path, "frame buffer size mismatch"))?;
                    return Ok(apply_rotation(frame, rotation));
                }
            }

            Err(decode_failed(clip_path, "no frame decoded"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_source_missing_file_is_decode_failed() {
        let result = StillFrameSource.first_frame(Path::new("/nonexistent/clip.mov"));
        match result {
            Err(ThumbnailError::DecodeFailed { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/clip.mov"));
            }
            other => panic!("expected DecodeFailed, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn test_still_source_sniffs_content_not_extension() {
        let temp = tempfile::tempdir().unwrap();
        let clip_path = temp.path().join("2024_01_01_00_00_00.mov");

        // A real PNG behind a .mov name still decodes.
        let frame = RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]));
        frame.save_with_format(&clip_path, image::ImageFormat::Png).unwrap();

        let decoded = StillFrameSource.first_frame(&clip_path).unwrap();
        assert_eq!(decoded.dimensions(), (4, 2));
        assert_eq!(decoded.get_pixel(0, 0), &image::Rgb([10, 20, 30]));
    }
}

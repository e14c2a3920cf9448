use std::path::Path;

use image::{ImageFormat, ImageReader};
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::frame::FrameView;

use super::animated::AnimatedReader;
use super::gif_reader::GifReader;
use super::still::StillReader;

/// Outcome of positioning a container on a frame index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekOutcome {
    FrameFound,
    /// The requested index is past the last frame. The container stays on
    /// the last frame it decoded.
    EndOfSequence,
}

/// A sequentially decoded multi-frame image.
///
/// Frame counts are not assumed to be known up front; callers discover
/// them by seeking until [`SeekOutcome::EndOfSequence`].
pub trait FrameSource {
    /// Position the container on the 0-based frame `index`.
    fn seek(&mut self, index: usize) -> Result<SeekOutcome>;

    /// Index of the active frame, `None` before the first successful seek.
    fn current_index(&self) -> Option<usize>;

    /// The active frame, `None` before the first successful seek.
    fn active_frame(&self) -> Option<FrameView<'_>>;

    /// Short codec name for logging.
    fn format_name(&self) -> &'static str;
}

/// Open an image container, choosing the backend from the file contents.
pub fn open_container(path: &Path) -> Result<Box<dyn FrameSource>> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    match reader.format() {
        Some(ImageFormat::Gif) => {
            debug!(path = %path.display(), "Opening GIF container");
            Ok(Box::new(GifReader::open(path)?))
        }
        Some(format @ (ImageFormat::Png | ImageFormat::WebP)) => {
            match AnimatedReader::open(path, format)? {
                Some(animation) => {
                    debug!(path = %path.display(), ?format, "Opening animation");
                    Ok(Box::new(animation))
                }
                None => {
                    debug!(path = %path.display(), ?format, "Opening still image");
                    Ok(Box::new(StillReader::new(reader)))
                }
            }
        }
        Some(format) => {
            debug!(path = %path.display(), ?format, "Opening still image");
            Ok(Box::new(StillReader::new(reader)))
        }
        None => Err(ExtractError::UnrecognizedFormat {
            path: path.to_path_buf(),
        }),
    }
}

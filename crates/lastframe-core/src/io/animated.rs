use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, Frames, ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::error::Result;
use crate::frame::FrameView;

use super::container::{FrameSource, SeekOutcome};

/// Sequential reader for animated PNG and animated WebP.
///
/// `image` composites these formats itself, so every frame is exposed as
/// the full RGBA canvas.
pub struct AnimatedReader {
    path: PathBuf,
    format: ImageFormat,
    frames: Frames<'static>,
    /// Index the decoder will produce next.
    next_index: usize,
    exhausted: bool,
    active: Option<RgbaImage>,
}

impl AnimatedReader {
    /// Open `path` as an animation, or return `None` if the file holds a
    /// single image.
    pub fn open(path: &Path, format: ImageFormat) -> Result<Option<Self>> {
        let Some(frames) = animation_frames(path, format)? else {
            return Ok(None);
        };
        info!(path = %path.display(), ?format, "Opened animation");
        Ok(Some(Self {
            path: path.to_path_buf(),
            format,
            frames,
            next_index: 0,
            exhausted: false,
            active: None,
        }))
    }

    /// Reopen the file so decoding starts again from frame 0.
    fn rewind(&mut self) -> Result<()> {
        debug!(path = %self.path.display(), "Rewinding animation decoder");
        // A file replaced by a still image since opening reads as empty.
        match animation_frames(&self.path, self.format)? {
            Some(frames) => {
                self.frames = frames;
                self.exhausted = false;
            }
            None => self.exhausted = true,
        }
        self.next_index = 0;
        self.active = None;
        Ok(())
    }

    fn advance(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let Some(frame) = self.frames.next().transpose()? else {
            self.exhausted = true;
            debug!(frames = self.next_index, "Reached end of animation");
            return Ok(false);
        };

        let (left, top) = (frame.left(), frame.top());
        let canvas = frame.into_buffer();
        debug!(
            index = self.next_index,
            left,
            top,
            width = canvas.width(),
            height = canvas.height(),
            "Decoded animation frame"
        );
        self.active = Some(canvas);
        self.next_index += 1;
        Ok(true)
    }
}

impl FrameSource for AnimatedReader {
    fn seek(&mut self, index: usize) -> Result<SeekOutcome> {
        match self.current_index() {
            Some(current) if current == index => return Ok(SeekOutcome::FrameFound),
            Some(current) if index < current => self.rewind()?,
            _ => {}
        }
        while self.current_index().map_or(true, |current| current < index) {
            if !self.advance()? {
                return Ok(SeekOutcome::EndOfSequence);
            }
        }
        Ok(SeekOutcome::FrameFound)
    }

    fn current_index(&self) -> Option<usize> {
        self.active.as_ref().map(|_| self.next_index - 1)
    }

    fn active_frame(&self) -> Option<FrameView<'_>> {
        self.active.as_ref().map(FrameView::Rgba)
    }

    fn format_name(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "apng",
            _ => "webp",
        }
    }
}

/// Frame iterator for an animated PNG or WebP file, `None` for still images
/// and every other format.
fn animation_frames(path: &Path, format: ImageFormat) -> Result<Option<Frames<'static>>> {
    let file = BufReader::new(File::open(path)?);
    let frames = match format {
        ImageFormat::Png => {
            let decoder = PngDecoder::new(file)?;
            if !decoder.is_apng()? {
                return Ok(None);
            }
            decoder.apng()?.into_frames()
        }
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(file)?;
            if !decoder.has_animation() {
                return Ok(None);
            }
            decoder.into_frames()
        }
        _ => return Ok(None),
    };
    Ok(Some(frames))
}

use std::io::{BufRead, Seek};

use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::debug;

use crate::error::Result;
use crate::frame::{ColorMode, FrameView};

use super::container::{FrameSource, SeekOutcome};

/// Single-frame container for any non-animated format `image` can decode.
pub struct StillReader<R: BufRead + Seek> {
    reader: Option<ImageReader<R>>,
    format: Option<ImageFormat>,
    image: Option<DynamicImage>,
}

impl<R: BufRead + Seek> StillReader<R> {
    pub fn new(reader: ImageReader<R>) -> Self {
        Self {
            format: reader.format(),
            reader: Some(reader),
            image: None,
        }
    }
}

impl<R: BufRead + Seek> FrameSource for StillReader<R> {
    fn seek(&mut self, index: usize) -> Result<SeekOutcome> {
        if index > 0 {
            return Ok(SeekOutcome::EndOfSequence);
        }
        if self.image.is_none() {
            // The reader is consumed by decoding; a failed decode leaves no frame.
            let Some(reader) = self.reader.take() else {
                return Ok(SeekOutcome::EndOfSequence);
            };
            let image = reader.decode()?;
            debug!(
                width = image.width(),
                height = image.height(),
                mode = %ColorMode::of(&image),
                "Decoded still image"
            );
            self.image = Some(image);
        }
        Ok(SeekOutcome::FrameFound)
    }

    fn current_index(&self) -> Option<usize> {
        self.image.as_ref().map(|_| 0)
    }

    fn active_frame(&self) -> Option<FrameView<'_>> {
        self.image.as_ref().map(FrameView::Direct)
    }

    fn format_name(&self) -> &'static str {
        self.format
            .and_then(|f| f.extensions_str().first().copied())
            .unwrap_or("image")
    }
}

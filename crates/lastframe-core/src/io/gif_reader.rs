use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use gif::DisposalMethod;
use image::{Rgba, RgbaImage};
use tracing::{debug, info};

use crate::error::{ExtractError, Result};
use crate::frame::{palette_color, FrameView, IndexedFrame};

use super::container::{FrameSource, SeekOutcome};

/// Sequential GIF reader that composites frames onto the logical screen.
///
/// The first frame is exposed in its stored palette form. Every later frame
/// is exposed as the composited RGBA screen, since its visible content
/// depends on the frames drawn before it.
pub struct GifReader {
    path: PathBuf,
    /// `None` when the stream ends before its first image.
    decoder: Option<gif::Decoder<BufReader<File>>>,
    screen: Screen,
    /// Index the decoder will produce next.
    next_index: usize,
    exhausted: bool,
    active: Option<ActiveFrame>,
}

enum ActiveFrame {
    Indexed(IndexedFrame),
    Composited,
}

impl GifReader {
    /// Open a GIF file and read its logical screen descriptor.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;

        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let decoder = match options.read_info(BufReader::new(file)) {
            Ok(decoder) => decoder,
            Err(err) => return Self::open_imageless(path, err),
        };

        let width = u32::from(decoder.width());
        let height = u32::from(decoder.height());
        if width == 0 || height == 0 {
            return Err(ExtractError::InvalidDimensions { width, height });
        }

        let screen = Screen::new(
            width,
            height,
            decoder.global_palette().map(<[u8]>::to_vec),
            decoder.bg_color().and_then(|i| u8::try_from(i).ok()),
        );
        debug!(
            palette_entries = decoder.global_palette().map_or(0, |p| p.len() / 3),
            "Read GIF global palette"
        );
        info!(path = %path.display(), width, height, "Opened GIF");

        Ok(Self {
            path: path.to_path_buf(),
            decoder: Some(decoder),
            screen,
            next_index: 0,
            exhausted: false,
            active: None,
        })
    }

    /// `gif` refuses streams that hit the trailer before any image. Such a
    /// file is still well formed, so it opens as a container with no frames.
    /// Anything else keeps the decoder's error.
    fn open_imageless(path: &Path, err: gif::DecodingError) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let Some((width, height)) = imageless_screen(&bytes) else {
            return Err(err.into());
        };
        let (width, height) = (u32::from(width), u32::from(height));
        if width == 0 || height == 0 {
            return Err(ExtractError::InvalidDimensions { width, height });
        }
        info!(path = %path.display(), width, height, "Opened GIF without images");

        Ok(Self {
            path: path.to_path_buf(),
            decoder: None,
            screen: Screen::new(width, height, None, None),
            next_index: 0,
            exhausted: true,
            active: None,
        })
    }

    /// Logical screen size.
    pub fn dimensions(&self) -> (u32, u32) {
        self.screen.canvas.dimensions()
    }

    /// Reopen the file so decoding starts again from frame 0.
    fn rewind(&mut self) -> Result<()> {
        debug!(path = %self.path.display(), "Rewinding GIF decoder");
        let path = self.path.clone();
        *self = Self::open(&path)?;
        Ok(())
    }

    /// Decode the next frame. Returns `false` once the stream is exhausted.
    fn advance(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let index = self.next_index;
        let Some(decoder) = self.decoder.as_mut() else {
            self.exhausted = true;
            return Ok(false);
        };
        let Some(frame) = decoder.read_next_frame()? else {
            self.exhausted = true;
            debug!(frames = index, "Reached end of GIF");
            return Ok(false);
        };

        debug!(
            index,
            left = frame.left,
            top = frame.top,
            width = frame.width,
            height = frame.height,
            dispose = ?frame.dispose,
            "Decoded GIF frame"
        );
        self.screen.draw(frame, index)?;
        self.active = Some(if index == 0 {
            ActiveFrame::Indexed(self.screen.indexed(frame, index)?)
        } else {
            ActiveFrame::Composited
        });
        self.next_index += 1;
        Ok(true)
    }
}

impl FrameSource for GifReader {
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
        match self.active.as_ref()? {
            ActiveFrame::Indexed(frame) => Some(FrameView::Indexed(frame)),
            ActiveFrame::Composited => Some(FrameView::Rgba(&self.screen.canvas)),
        }
    }

    fn format_name(&self) -> &'static str {
        "gif"
    }
}

/// Frame rectangle clipped to the logical screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Rect {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl Rect {
    fn clipped(frame: &gif::Frame<'_>, screen_width: u32, screen_height: u32) -> Self {
        let left = u32::from(frame.left).min(screen_width);
        let top = u32::from(frame.top).min(screen_height);
        Self {
            left,
            top,
            width: u32::from(frame.width).min(screen_width - left),
            height: u32::from(frame.height).min(screen_height - top),
        }
    }
}

/// Disposal owed by the most recently drawn frame.
struct PendingDisposal {
    rect: Rect,
    method: DisposalMethod,
    saved: Option<RgbaImage>,
}

/// The GIF logical screen.
struct Screen {
    canvas: RgbaImage,
    global_palette: Option<Vec<u8>>,
    background_index: Option<u8>,
    pending: Option<PendingDisposal>,
}

impl Screen {
    fn new(
        width: u32,
        height: u32,
        global_palette: Option<Vec<u8>>,
        background_index: Option<u8>,
    ) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
            global_palette,
            background_index,
            pending: None,
        }
    }

    fn dispose_previous(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match pending.method {
            DisposalMethod::Background => {
                let Rect {
                    left,
                    top,
                    width,
                    height,
                } = pending.rect;
                for y in top..top + height {
                    for x in left..left + width {
                        self.canvas.put_pixel(x, y, Rgba([0, 0, 0, 0]));
                    }
                }
            }
            DisposalMethod::Previous => {
                if let Some(saved) = pending.saved {
                    self.canvas = saved;
                }
            }
            // Keep, Any
            _ => {}
        }
    }

    /// Apply the previous frame's disposal, then draw `frame` over the screen.
    fn draw(&mut self, frame: &gif::Frame<'_>, index: usize) -> Result<()> {
        self.dispose_previous();

        let (screen_width, screen_height) = self.canvas.dimensions();
        let rect = Rect::clipped(frame, screen_width, screen_height);
        let saved = (frame.dispose == DisposalMethod::Previous).then(|| self.canvas.clone());

        let palette = frame_palette(frame, self.global_palette.as_deref(), index)?;
        let stride = usize::from(frame.width);
        for y in 0..rect.height {
            for x in 0..rect.width {
                let Some(&pixel) = frame.buffer.get(y as usize * stride + x as usize) else {
                    continue;
                };
                if frame.transparent == Some(pixel) {
                    continue;
                }
                self.canvas.put_pixel(
                    rect.left + x,
                    rect.top + y,
                    palette_color(palette, frame.transparent, pixel),
                );
            }
        }

        self.pending = Some(PendingDisposal {
            rect,
            method: frame.dispose,
            saved,
        });
        Ok(())
    }

    /// Screen-sized palette form of a frame drawn on an empty screen.
    ///
    /// Pixels outside the frame carry the transparent index, or the
    /// background index when the frame has no transparency.
    fn indexed(&self, frame: &gif::Frame<'_>, index: usize) -> Result<IndexedFrame> {
        let (screen_width, screen_height) = self.canvas.dimensions();
        let rect = Rect::clipped(frame, screen_width, screen_height);
        let fill = frame.transparent.or(self.background_index).unwrap_or(0);

        let mut indices = vec![fill; screen_width as usize * screen_height as usize];
        let stride = usize::from(frame.width);
        for y in 0..rect.height {
            for x in 0..rect.width {
                if let Some(&pixel) = frame.buffer.get(y as usize * stride + x as usize) {
                    let dst = (rect.top + y) as usize * screen_width as usize
                        + (rect.left + x) as usize;
                    indices[dst] = pixel;
                }
            }
        }

        IndexedFrame::new(
            screen_width,
            screen_height,
            indices,
            frame_palette(frame, self.global_palette.as_deref(), index)?.to_vec(),
            frame.transparent,
        )
    }
}

/// Logical screen size of a GIF stream that reaches its trailer without an
/// image descriptor. Extension blocks before the trailer are skipped.
fn imageless_screen(bytes: &[u8]) -> Option<(u16, u16)> {
    const TRAILER: u8 = 0x3B;
    const EXTENSION: u8 = 0x21;

    let header = bytes.get(..13)?;
    if &header[..6] != b"GIF87a" && &header[..6] != b"GIF89a" {
        return None;
    }
    let width = u16::from_le_bytes([header[6], header[7]]);
    let height = u16::from_le_bytes([header[8], header[9]]);
    let flags = header[10];

    let mut pos = 13;
    if flags & 0x80 != 0 {
        pos += 3 << ((flags & 0x07) + 1);
    }
    loop {
        match *bytes.get(pos)? {
            TRAILER => return Some((width, height)),
            EXTENSION => {
                // introducer, label, then length-prefixed sub-blocks up to 0
                pos += 2;
                loop {
                    let len = usize::from(*bytes.get(pos)?);
                    pos += 1 + len;
                    if len == 0 {
                        break;
                    }
                }
            }
            _ => return None,
        }
    }
}

/// Local palette if the frame has one, global otherwise.
fn frame_palette<'a>(
    frame: &'a gif::Frame<'_>,
    global: Option<&'a [u8]>,
    index: usize,
) -> Result<&'a [u8]> {
    frame
        .palette
        .as_deref()
        .or(global)
        .ok_or(ExtractError::MissingPalette { index })
}

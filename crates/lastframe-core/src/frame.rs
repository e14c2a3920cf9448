use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::{ExtractError, Result};

/// A palette-indexed frame, kept in its stored form.
///
/// The index buffer always holds exactly `width * height` entries.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedFrame {
    width: u32,
    height: u32,
    /// One palette index per pixel, row-major, shape = (height, width)
    indices: Vec<u8>,
    /// Packed RGB triples
    palette: Vec<u8>,
    /// Palette index rendered as fully transparent
    transparent: Option<u8>,
}

impl IndexedFrame {
    pub fn new(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Vec<u8>,
        transparent: Option<u8>,
    ) -> Result<Self> {
        if indices.len() != width as usize * height as usize {
            return Err(ExtractError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            indices,
            palette,
            transparent,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn palette(&self) -> &[u8] {
        &self.palette
    }

    pub fn transparent(&self) -> Option<u8> {
        self.transparent
    }

    /// Resolve a palette index to RGBA.
    ///
    /// The transparent index keeps its palette color with zero alpha.
    /// Indices past the end of the palette resolve to opaque black.
    pub fn color_at(&self, index: u8) -> Rgba<u8> {
        palette_color(&self.palette, self.transparent, index)
    }

    /// Expand every index through the palette.
    pub fn to_rgba(&self) -> RgbaImage {
        let mut lut = [Rgba([0u8; 4]); 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = self.color_at(i as u8);
        }

        let stride = self.width as usize;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            lut[self.indices[y as usize * stride + x as usize] as usize]
        })
    }
}

/// Look up `index` in a packed RGB palette.
pub fn palette_color(palette: &[u8], transparent: Option<u8>, index: u8) -> Rgba<u8> {
    let base = index as usize * 3;
    let [r, g, b] = match palette.get(base..base + 3) {
        Some(rgb) => [rgb[0], rgb[1], rgb[2]],
        None => [0, 0, 0],
    };
    let alpha = if transparent == Some(index) { 0 } else { 255 };
    Rgba([r, g, b, alpha])
}

/// Pixel storage mode of a decoded frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Indexed,
    Luma,
    LumaAlpha,
    Rgb,
    Rgba,
    Other,
}

impl ColorMode {
    pub fn of(image: &DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageLuma16(_) => Self::Luma,
            DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => Self::LumaAlpha,
            DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgb16(_)
            | DynamicImage::ImageRgb32F(_) => Self::Rgb,
            DynamicImage::ImageRgba8(_)
            | DynamicImage::ImageRgba16(_)
            | DynamicImage::ImageRgba32F(_) => Self::Rgba,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Indexed => write!(f, "Indexed"),
            Self::Luma => write!(f, "Grayscale"),
            Self::LumaAlpha => write!(f, "Grayscale + Alpha"),
            Self::Rgb => write!(f, "RGB"),
            Self::Rgba => write!(f, "RGBA"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Borrowed view of the frame a container is currently positioned on.
#[derive(Clone, Copy, Debug)]
pub enum FrameView<'a> {
    Indexed(&'a IndexedFrame),
    Rgba(&'a RgbaImage),
    Direct(&'a DynamicImage),
}

impl FrameView<'_> {
    pub fn mode(&self) -> ColorMode {
        match self {
            Self::Indexed(_) => ColorMode::Indexed,
            Self::Rgba(_) => ColorMode::Rgba,
            Self::Direct(image) => ColorMode::of(image),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Indexed(frame) => (frame.width(), frame.height()),
            Self::Rgba(image) => image.dimensions(),
            Self::Direct(image) => (image.width(), image.height()),
        }
    }
}

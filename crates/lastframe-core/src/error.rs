use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GIF decoding error: {0}")]
    Gif(#[from] gif::DecodingError),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unrecognized image format: {}", path.display())]
    UnrecognizedFormat { path: PathBuf },

    #[error("Frame {index} has no local or global palette")]
    MissingPalette { index: usize },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Container has no frames: {}", path.display())]
    EmptyContainer { path: PathBuf },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, ExtractError>;

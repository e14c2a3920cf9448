use std::path::Path;

use image::{DynamicImage, ImageFormat};

use crate::error::Result;

/// Save an image as PNG, keeping its color type.
pub fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

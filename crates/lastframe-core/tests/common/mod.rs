#![allow(dead_code)]

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use gif::DisposalMethod;

/// Global palette used by the synthetic GIFs: red, green, blue, white.
pub const PALETTE: [u8; 12] = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];

pub const RED: u8 = 0;
pub const GREEN: u8 = 1;
pub const BLUE: u8 = 2;
pub const WHITE: u8 = 3;

/// A frame filled with a single palette index.
pub fn solid_frame(width: u16, height: u16, index: u8) -> gif::Frame<'static> {
    indexed_frame(width, height, vec![index; width as usize * height as usize])
}

/// A full frame from explicit palette indices, row-major.
pub fn indexed_frame(width: u16, height: u16, indices: Vec<u8>) -> gif::Frame<'static> {
    gif::Frame {
        width,
        height,
        dispose: DisposalMethod::Keep,
        buffer: Cow::Owned(indices),
        ..gif::Frame::default()
    }
}

/// A frame placed at (`left`, `top`) inside the logical screen.
pub fn patch_frame(left: u16, top: u16, width: u16, height: u16, index: u8) -> gif::Frame<'static> {
    let mut frame = solid_frame(width, height, index);
    frame.left = left;
    frame.top = top;
    frame
}

/// Encode frames into an in-memory GIF with the global [`PALETTE`].
pub fn build_gif(width: u16, height: u16, frames: &[gif::Frame<'_>]) -> Vec<u8> {
    build_gif_with_palette(width, height, &PALETTE, frames)
}

/// Encode frames into an in-memory GIF with an explicit global palette.
pub fn build_gif_with_palette(
    width: u16,
    height: u16,
    palette: &[u8],
    frames: &[gif::Frame<'_>],
) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder =
            gif::Encoder::new(&mut bytes, width, height, palette).expect("create GIF encoder");
        for frame in frames {
            encoder.write_frame(frame).expect("write GIF frame");
        }
    }
    bytes
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

/// Expected RGBA for an opaque palette index of [`PALETTE`].
pub fn rgba(index: u8) -> image::Rgba<u8> {
    let base = index as usize * 3;
    image::Rgba([PALETTE[base], PALETTE[base + 1], PALETTE[base + 2], 255])
}

/// Decode a written output file.
pub fn load_output(path: &Path) -> image::DynamicImage {
    image::open(path).expect("decode output image")
}

/// Encode RGBA frames of equal size into an in-memory animated PNG.
pub fn build_apng(width: u32, height: u32, frames: &[image::Rgba<u8>]) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .set_animated(frames.len() as u32, 0)
            .expect("mark PNG as animated");
        let mut writer = encoder.write_header().expect("write PNG header");
        for color in frames {
            let data: Vec<u8> = (0..width * height).flat_map(|_| color.0).collect();
            writer.write_image_data(&data).expect("write APNG frame");
        }
        writer.finish().expect("finish APNG");
    }
    bytes
}

pub mod animated;
pub mod container;
pub mod gif_reader;
pub mod image_io;
pub mod still;

pub use container::{open_container, FrameSource, SeekOutcome};

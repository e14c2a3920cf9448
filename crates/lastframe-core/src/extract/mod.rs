pub mod config;
mod extractor;
mod types;

pub use extractor::{
    count_frames, extract_last_frame, extract_last_frame_reported, normalize_frame,
};
pub use types::{ExtractStage, Extraction, ProgressReporter};

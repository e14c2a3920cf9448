use std::path::PathBuf;

use crate::frame::ColorMode;

/// Extraction stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractStage {
    Opening,
    CountingFrames,
    Seeking,
    Normalizing,
    Encoding,
}

impl std::fmt::Display for ExtractStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opening => write!(f, "Opening container"),
            Self::CountingFrames => write!(f, "Counting frames"),
            Self::Seeking => write!(f, "Seeking last frame"),
            Self::Normalizing => write!(f, "Normalizing colors"),
            Self::Encoding => write!(f, "Writing PNG"),
        }
    }
}

/// Result of a successful extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extraction {
    /// Frames found by traversal.
    pub frame_count: usize,
    pub output: PathBuf,
    /// Color mode of the last frame as stored in the container.
    pub source_mode: ColorMode,
    /// Color mode written to the output.
    pub output_mode: ColorMode,
    pub width: u32,
    pub height: u32,
}

/// Progress reporting for the extractor.
///
/// Implementors can use this to drive spinners or logging. All methods
/// have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// in this stage, if known.
    fn begin_stage(&self, _stage: ExtractStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `extract_last_frame` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

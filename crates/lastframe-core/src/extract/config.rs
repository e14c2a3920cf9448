use std::path::{Path, PathBuf};

use crate::consts::{DEFAULT_ASSET_DIR, DEFAULT_INPUT_NAME, DEFAULT_OUTPUT_NAME};

/// Paths for a single extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ExtractConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Default layout: `<dir>/public/landing_cat.gif` to
    /// `<dir>/public/landing_cat_static.png`.
    pub fn beside(dir: &Path) -> Self {
        let assets = dir.join(DEFAULT_ASSET_DIR);
        Self::new(
            assets.join(DEFAULT_INPUT_NAME),
            assets.join(DEFAULT_OUTPUT_NAME),
        )
    }
}

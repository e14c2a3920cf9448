use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use lastframe_core::extract::{ExtractStage, ProgressReporter};

/// Stderr spinner driven by extractor stages. Hidden when stderr is not a
/// terminal.
pub struct SpinnerReporter {
    bar: ProgressBar,
    stage: Mutex<Option<ExtractStage>>,
}

impl SpinnerReporter {
    pub fn new() -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Self {
            bar,
            stage: Mutex::new(None),
        })
    }

    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn begin_stage(&self, stage: ExtractStage, _total_items: Option<usize>) {
        if let Ok(mut current) = self.stage.lock() {
            *current = Some(stage);
        }
        self.bar.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        let stage = self.stage.lock().ok().and_then(|s| *s);
        if let Some(stage) = stage {
            self.bar.set_message(format!("{stage}: {items_done}"));
        }
    }
}

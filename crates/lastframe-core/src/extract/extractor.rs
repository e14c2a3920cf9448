use image::DynamicImage;
use tracing::{debug, info};

use crate::error::{ExtractError, Result};
use crate::frame::{ColorMode, FrameView};
use crate::io::image_io::save_png;
use crate::io::{open_container, FrameSource, SeekOutcome};

use super::config::ExtractConfig;
use super::types::{ExtractStage, Extraction, NoOpReporter, ProgressReporter};

/// Count frames by seeking `0, 1, 2, …` until the container reports
/// [`SeekOutcome::EndOfSequence`].
///
/// The container is left on the last frame it could reach.
pub fn count_frames(
    source: &mut dyn FrameSource,
    reporter: &dyn ProgressReporter,
) -> Result<usize> {
    let count = staged(reporter, ExtractStage::CountingFrames, || {
        let mut count = 0;
        while source.seek(count)? == SeekOutcome::FrameFound {
            count += 1;
            reporter.advance(count);
        }
        Ok(count)
    })?;
    debug!(count, format = source.format_name(), "Frame traversal finished");
    Ok(count)
}

/// Detach a frame from its container as a renderable image.
///
/// Palette frames are expanded to RGBA. Direct-color frames are copied
/// with their native color type.
pub fn normalize_frame(frame: FrameView<'_>) -> DynamicImage {
    match frame {
        FrameView::Indexed(indexed) => DynamicImage::ImageRgba8(indexed.to_rgba()),
        FrameView::Rgba(rgba) => DynamicImage::ImageRgba8(rgba.clone()),
        FrameView::Direct(image) => image.clone(),
    }
}

/// Run `work` inside `stage`. The stage is finished whether or not the work
/// succeeds.
fn staged<T>(
    reporter: &dyn ProgressReporter,
    stage: ExtractStage,
    work: impl FnOnce() -> Result<T>,
) -> Result<T> {
    reporter.begin_stage(stage, None);
    let result = work();
    reporter.finish_stage();
    result
}

/// Write the last frame of `config.input` as a PNG at `config.output`.
pub fn extract_last_frame(config: &ExtractConfig) -> Result<Extraction> {
    extract_last_frame_reported(config, &NoOpReporter)
}

/// Same as [`extract_last_frame`], with stage notifications.
pub fn extract_last_frame_reported(
    config: &ExtractConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Extraction> {
    let mut source = staged(reporter, ExtractStage::Opening, || {
        open_container(&config.input)
    })?;

    let frame_count = count_frames(source.as_mut(), reporter)?;
    info!(
        frame_count,
        format = source.format_name(),
        input = %config.input.display(),
        "Counted frames"
    );
    if frame_count == 0 {
        return Err(ExtractError::EmptyContainer {
            path: config.input.clone(),
        });
    }

    let last = frame_count - 1;
    let out_of_range = || ExtractError::FrameIndexOutOfRange {
        index: last,
        total: frame_count,
    };
    staged(reporter, ExtractStage::Seeking, || {
        let found = source.seek(last)? == SeekOutcome::FrameFound;
        if found && source.current_index() == Some(last) {
            Ok(())
        } else {
            Err(out_of_range())
        }
    })?;
    let frame = source.active_frame().ok_or_else(out_of_range)?;

    let source_mode = frame.mode();
    let (width, height) = frame.dimensions();
    debug!(index = last, mode = %source_mode, width, height, "Positioned on last frame");

    let image = staged(reporter, ExtractStage::Normalizing, || Ok(normalize_frame(frame)))?;
    staged(reporter, ExtractStage::Encoding, || save_png(&image, &config.output))?;

    let output_mode = ColorMode::of(&image);
    info!(
        output = %config.output.display(),
        mode = %output_mode,
        "Wrote last frame"
    );

    Ok(Extraction {
        frame_count,
        output: config.output.clone(),
        source_mode,
        output_mode,
        width,
        height,
    })
}

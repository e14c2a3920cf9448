use console::Style;
use lastframe_core::extract::Extraction;

pub fn print_extraction(extraction: &Extraction) {
    println!("Total frames in GIF: {}", extraction.frame_count);
    println!("Last frame saved as: {}", extraction.output.display());
}

/// One-line error with the full cause chain.
pub fn print_error(err: &anyhow::Error) {
    let label = Style::new().for_stderr().red().bold();
    eprintln!("{} {:#}", label.apply_to("Error:"), err);
}

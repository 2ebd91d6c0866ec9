//! CLI output formatting for batch runs.
//!
//! # Output Format
//!
//! ```text
//! Processing 3 images from photos/
//! 001 photos/dawn.jpg
//!     Scaled: 1200x800 → 600x400
//!     Cropped: 600x400 → 600x300
//!     Output: out/dawn.png
//! 002 photos/dusk.webp
//!     Re-encoded: 640x480
//!     Output: out/dusk.png
//! 003 photos/broken.jpg
//!     Error: Failed to decode input image: ...
//!
//! Done: 2 processed, 1 failed
//! ```
//!
//! Files are processed in parallel, so entries may appear out of order; the
//! index is the file's position in the sorted input listing. Each entry is
//! printed as one block, so lines of different files never interleave.
//!
//! # Architecture
//!
//! Each event has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::batch::{BatchSummary, ProcessEvent};
use crate::imaging::TransformStep;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Format a single batch progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::BatchStarted { input, file_count } => {
            if *file_count == 0 {
                vec![format!("No images found in {}", input.display())]
            } else {
                vec![format!(
                    "Processing {} from {}",
                    plural(*file_count, "image"),
                    input.display()
                )]
            }
        }
        ProcessEvent::FileProcessed {
            index,
            input,
            output,
            report,
        } => {
            let mut lines = vec![format!("{} {}", format_index(*index), input.display())];
            if report.steps.is_empty() {
                lines.push(format!("{}Re-encoded: {}", indent(1), report.source));
            }
            for step in &report.steps {
                let line = match step {
                    TransformStep::Scaled { from, to } => format!("Scaled: {from} → {to}"),
                    TransformStep::Cropped { from, to } => format!("Cropped: {from} → {to}"),
                };
                lines.push(format!("{}{}", indent(1), line));
            }
            lines.push(format!("{}Output: {}", indent(1), output.display()));
            lines
        }
        ProcessEvent::FileFailed {
            index,
            input,
            error,
        } => vec![
            format!("{} {}", format_index(*index), input.display()),
            format!("{}Error: {}", indent(1), error),
        ],
    }
}

/// Print a progress event to stdout.
pub fn print_process_event(event: &ProcessEvent) {
    for line in format_process_event(event) {
        println!("{}", line);
    }
}

/// Format the closing summary of a batch.
pub fn format_summary(summary: &BatchSummary) -> Vec<String> {
    if summary.outcomes.is_empty() {
        return Vec::new();
    }
    vec![String::new(), format!("Done: {}", summary)]
}

pub fn print_summary(summary: &BatchSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

//! Batch driver: runs the transform pipeline over one file or a directory.
//!
//! ## Input resolution
//!
//! - **File input**: if `--output` has an extension it is the output file;
//!   otherwise it is a directory and the output keeps the input's name with
//!   the extension swapped (see [`naming`](crate::naming)).
//! - **Directory input**: every top-level file with a supported image
//!   extension is processed, in name order. Other files and subdirectories
//!   are skipped. `--output` is always a directory.
//!
//! Output directories are created as needed.
//!
//! ## Per-file handling
//!
//! ```text
//! read input ──▶ delete old output ──▶ transform into temp file ──▶ rename
//! ```
//!
//! When the output is the input itself (converting in place), nothing is
//! deleted up front and the source is only replaced by the final rename.
//!
//! The encoded image is staged in a temp file inside the destination
//! directory and renamed into place only after the pipeline succeeds, so a
//! failed file never leaves a truncated output behind. A file's failure is
//! recorded and reported; the batch always moves on to the next file.
//!
//! ## Parallel Processing
//!
//! Files are independent, so they are processed in parallel using
//! [rayon](https://docs.rs/rayon) on whatever pool is current (the CLI sizes
//! the global pool from `--threads`). Progress is streamed as
//! [`ProcessEvent`]s over an optional channel; results come back in input
//! order regardless of completion order.
//!
//! Inputs that differ only by extension (`a.jpg`, `a.png`) map to the same
//! output. Such jobs run one after another in input order, so the last one
//! always wins.

use crate::config::ScaleConfig;
use crate::imaging::{
    ImageBackend, OutputFormat, RustBackend, TransformError, TransformReport, transform,
};
use crate::naming::{is_file_path, is_supported_image, output_file_name};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Errors that stop a batch before any file is processed.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),
    #[error("Input has no file name: {0}")]
    NoFileName(PathBuf),
}

/// Why a single file failed. Never fatal to the batch.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// One input file and where its output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Progress events emitted while a batch runs.
#[derive(Debug)]
pub enum ProcessEvent {
    /// Emitted once, before any file is processed.
    BatchStarted { input: PathBuf, file_count: usize },
    /// A file was transformed and written.
    FileProcessed {
        /// 1-based position in the batch.
        index: usize,
        input: PathBuf,
        output: PathBuf,
        report: TransformReport,
    },
    /// A file failed; nothing was written for it.
    FileFailed {
        index: usize,
        input: PathBuf,
        error: String,
    },
}

/// Result for one file of a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub job: Job,
    pub result: Result<TransformReport, FileError>,
}

/// Results for a whole batch, in input order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.processed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} processed, {} failed", self.processed(), self.failed())
    }
}

/// Resolve `input` and `output` into the list of files to process.
///
/// Creates the output directory (or the output file's parent) if missing.
pub fn collect_jobs(
    input: &Path,
    output: &Path,
    format: OutputFormat,
) -> Result<Vec<Job>, BatchError> {
    if input.is_file() {
        let output = if is_file_path(output) {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            output.to_path_buf()
        } else {
            fs::create_dir_all(output)?;
            let name = output_file_name(input, format)
                .ok_or_else(|| BatchError::NoFileName(input.to_path_buf()))?;
            output.join(name)
        };
        return Ok(vec![Job {
            input: input.to_path_buf(),
            output,
        }]);
    }

    if !input.is_dir() {
        return Err(BatchError::InputNotFound(input.to_path_buf()));
    }

    fs::create_dir_all(output)?;

    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_supported_image(p))
        .collect();
    files.sort();

    let jobs = files
        .into_iter()
        .filter_map(|input| {
            let name = output_file_name(&input, format)?;
            Some(Job {
                output: output.join(name),
                input,
            })
        })
        .collect();
    Ok(jobs)
}

/// Process `input` into `output` with the production backend.
pub fn run(
    input: &Path,
    output: &Path,
    config: &ScaleConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BatchSummary, BatchError> {
    let backend = RustBackend::new();
    run_with_backend(&backend, input, output, config, events)
}

/// Process a batch using a specific backend (allows testing with mock).
pub fn run_with_backend<B: ImageBackend>(
    backend: &B,
    input: &Path,
    output: &Path,
    config: &ScaleConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BatchSummary, BatchError> {
    let jobs = collect_jobs(input, output, config.output_format)?;

    emit(
        &events,
        ProcessEvent::BatchStarted {
            input: input.to_path_buf(),
            file_count: jobs.len(),
        },
    );

    let sender = &events;
    let mut indexed: Vec<(usize, FileOutcome)> = group_by_output(jobs)
        .into_par_iter()
        .flat_map_iter(|group| {
            group
                .into_iter()
                .map(move |(i, job)| (i, run_job(backend, config, sender, i + 1, job)))
        })
        .collect();
    indexed.sort_by_key(|(i, _)| *i);

    Ok(BatchSummary {
        outcomes: indexed.into_iter().map(|(_, outcome)| outcome).collect(),
    })
}

/// Split jobs into groups that share an output path, keeping input order.
///
/// Groups run in parallel; the jobs inside one group run one after another,
/// so the last input in sorted order always wins a name clash.
fn group_by_output(jobs: Vec<Job>) -> Vec<Vec<(usize, Job)>> {
    let mut groups: Vec<Vec<(usize, Job)>> = Vec::new();
    let mut by_output: HashMap<PathBuf, usize> = HashMap::new();

    for (i, job) in jobs.into_iter().enumerate() {
        match by_output.get(&job.output).copied() {
            Some(g) => {
                log::warn!(
                    "{} and {} both write {}; the later file wins",
                    groups[g][0].1.input.display(),
                    job.input.display(),
                    job.output.display()
                );
                groups[g].push((i, job));
            }
            None => {
                by_output.insert(job.output.clone(), groups.len());
                groups.push(vec![(i, job)]);
            }
        }
    }
    groups
}

fn run_job<B: ImageBackend>(
    backend: &B,
    config: &ScaleConfig,
    events: &Option<Sender<ProcessEvent>>,
    index: usize,
    job: Job,
) -> FileOutcome {
    let result = process_file(backend, config, &job);
    let event = match &result {
        Ok(report) => ProcessEvent::FileProcessed {
            index,
            input: job.input.clone(),
            output: job.output.clone(),
            report: report.clone(),
        },
        Err(e) => {
            log::warn!("{}: {e}", job.input.display());
            ProcessEvent::FileFailed {
                index,
                input: job.input.clone(),
                error: e.to_string(),
            }
        }
    };
    emit(events, event);
    FileOutcome { job, result }
}

/// Run the pipeline for one job, staging output in a temp file.
pub fn process_file<B: ImageBackend>(
    backend: &B,
    config: &ScaleConfig,
    job: &Job,
) -> Result<TransformReport, FileError> {
    let bytes = fs::read(&job.input)?;

    // Stale output from an earlier run is removed even if this run fails.
    // When converting in place the output is the source, so it is only
    // replaced by the rename below.
    if !is_same_file(&job.input, &job.output) {
        match fs::remove_file(&job.output) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }

    let dir = job
        .output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;

    let report = {
        let mut writer = BufWriter::new(staged.as_file_mut());
        let report = transform(backend, config, &bytes, &mut writer)?;
        writer.flush()?;
        report
    };

    staged.persist(&job.output).map_err(|e| e.error)?;
    log::debug!("wrote {}", job.output.display());
    Ok(report)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn emit(events: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // The receiver only goes away if the printer thread died; keep processing.
        let _ = tx.send(event);
    }
}

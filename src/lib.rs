//! # Simple Scale
//!
//! Convert and resize images from the command line. Reads JPEG, PNG and
//! WebP; writes JPEG or PNG. Images can be scaled to a target width (height
//! follows the aspect ratio) and then cropped to a target height.
//!
//! # Pipeline
//!
//! Every input file goes through the same four steps:
//!
//! ```text
//! decode ──▶ scale to width ──▶ crop to height ──▶ encode
//!            (if width > 0)     (if still taller)
//! ```
//!
//! A single file or a whole directory can be processed in one run. Files in a
//! directory are independent: they are processed in parallel and a failure in
//! one never stops the others.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Dimension math, the [`imaging::ImageBackend`] trait, the pure-Rust backend and the [`imaging::transform`] pipeline |
//! | [`batch`] | Resolves input/output paths, runs the pipeline per file, emits progress events |
//! | [`naming`] | Input extension filter and output file naming |
//! | [`config`] | `simple-scale.toml` loading and validation, [`config::ScaleConfig`] |
//! | [`output`] | CLI output formatting for progress events and the summary |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling and encoding use the `image` crate only. No system
//! libraries, so the binary is self-contained.
//!
//! ## Backend Trait
//!
//! The pipeline is written against [`imaging::ImageBackend`] rather than the
//! `image` crate directly. Tests swap in a mock that records every operation
//! and counts live bitmaps, so pipeline logic is verified without encoding a
//! single pixel.
//!
//! ## Atomic Output
//!
//! Each output is encoded into a temp file next to its destination and
//! renamed into place on success. An interrupted or failed file never leaves
//! a truncated image behind.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;

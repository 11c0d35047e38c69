//! High-level facade crate for the `palm-lines-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the core types and the extraction
//!   pipeline
//! - downstream consumers of stitched paths: numeric line features and the
//!   rule-based reading text
//! - the manual-correction data path: externally-authored point sequences
//!   re-scored and re-featurized exactly like pipeline output
//! - (feature-gated) end-to-end helpers from `image::RgbImage` and a CLI
//!   binary
//!
//! ## Quickstart
//!
//! ```no_run
//! use palm_lines::detect;
//! use palm_lines::ExtractorParams;
//! use palm_lines_core::Landmarks;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::ImageReader::open("palm_roi.png")?.decode()?.to_rgb8();
//! let landmarks: Landmarks = serde_json::from_str(r#"{"points": []}"#)?;
//!
//! let analysis = detect::analyze_palm(&img, &landmarks, ExtractorParams::default())?;
//! println!("life-line confidence: {}", analysis.lines.life.confidence);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `palm_lines::core`: raster views, landmarks, polylines, results.
//! - `palm_lines::extract`: the extraction pipeline and its params.
//! - `palm_lines::features`: arc-length / curvature / slope / complexity
//!   metrics per line.
//! - `palm_lines::reading`: rule-based prose from features.
//! - `palm_lines::correct`: manual line replacement and its JSON document.
//! - `palm_lines::detect` (feature `image`): end-to-end helpers from
//!   `image::RgbImage`.

pub use palm_lines_core as core;
pub use palm_lines_extract as extract;

pub use palm_lines_core::{
    Handedness, Landmarks, LineCategory, LineDetection, PalmLinesResult, Polyline,
};
pub use palm_lines_extract::{ExtractorParams, PalmLineExtractor};

pub mod correct;
pub mod features;
pub mod reading;

#[cfg(feature = "image")]
pub mod detect;

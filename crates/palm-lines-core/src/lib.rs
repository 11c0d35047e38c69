//! Core types and utilities for palm-line extraction.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete image decoder or on the extraction pipeline; it
//! holds the raster views exchanged with callers, the hand-landmark model,
//! polyline math, and the detection result types.

mod image;
mod landmarks;
mod logger;
mod polyline;
mod result;

pub use image::{GrayImage, GrayImageView, RgbImageView};
pub use landmarks::{landmark, Handedness, Landmarks};
pub use polyline::{fit_line, simplify_rdp, Aabb, LineFit, Polyline};
pub use result::{LineCategory, LineDetection, PalmLinesResult};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

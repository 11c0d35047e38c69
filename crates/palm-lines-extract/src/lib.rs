//! Palm-line extraction pipeline built on top of `palm-lines-core`.
//!
//! ## Quickstart
//!
//! ```
//! use palm_lines_core::{Landmarks, RgbImageView};
//! use palm_lines_extract::{ExtractorParams, PalmLineExtractor};
//!
//! let extractor = PalmLineExtractor::new(ExtractorParams::default());
//!
//! let pixels = vec![128u8; 64 * 64 * 3];
//! let roi = RgbImageView::from_raw(64, 64, &pixels).unwrap();
//! let landmarks = Landmarks::default();
//!
//! let result = extractor.extract(&roi, &landmarks).unwrap();
//! println!("life-line confidence: {}", result.life.confidence);
//! ```
//!
//! Pipeline, one independent pass per line category:
//! 1. Build a binary zone mask from a landmark-anchored polygon.
//! 2. Enhance texture: luminance, CLAHE, edge-preserving bilateral smoothing.
//! 3. Binarize inside the zone: adaptive mean threshold OR bottom-hat ridge
//!    response, re-masked to the zone.
//! 4. Condition: morphological opening (denoise) then closing (gap bridging)
//!    with category-specific kernel sizing.
//! 5. Skeletonize to 1-pixel-wide medial curves by iterative thinning.
//! 6. Trace external contours into curve fragments, keep the few longest.
//! 7. Greedily stitch fragments into continuous paths by nearest-endpoint
//!    matching; keep the longest path.
//! 8. Score confidence as path length normalized by the region diagonal.

mod binarize;
mod enhance;
mod extractor;
mod fragments;
mod morphology;
mod params;
mod score;
mod skeleton;
mod stitch;
mod zones;

pub use binarize::binarize;
pub use enhance::enhance;
pub use extractor::{ExtractError, PalmLineExtractor};
pub use fragments::{extract_fragments, CurveFragment};
pub use morphology::{close, dilate, erode, open, Kernel};
pub use params::{
    BinarizeParams, ConfidenceParams, EnhanceParams, ExtractorParams, FragmentParams,
    MorphologyParams, StitchParams,
};
pub use score::score_path;
pub use skeleton::skeletonize;
pub use stitch::stitch_fragments;
pub use zones::{build_zone_mask, category_policy, CategoryPolicy};

//! Pipeline configuration. Every heuristic constant lives here so variants
//! can be tuned without touching stage code; defaults reproduce the
//! canonical adaptive-threshold pipeline.

use serde::{Deserialize, Serialize};

/// Texture-enhancement settings (CLAHE + bilateral smoothing).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnhanceParams {
    /// CLAHE contrast clip limit, in multiples of the uniform bin height.
    pub clahe_clip_limit: f32,
    /// CLAHE tile grid, `tiles × tiles`.
    pub clahe_tiles: usize,
    /// Bilateral filter window diameter (forced odd).
    pub bilateral_diameter: usize,
    /// Bilateral intensity sigma.
    pub bilateral_sigma_color: f32,
    /// Bilateral spatial sigma.
    pub bilateral_sigma_space: f32,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            clahe_clip_limit: 2.0,
            clahe_tiles: 8,
            bilateral_diameter: 9,
            bilateral_sigma_color: 75.0,
            bilateral_sigma_space: 75.0,
        }
    }
}

/// Zone-masked binarization settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinarizeParams {
    /// Adaptive-threshold block size = width / this divisor, forced odd.
    pub block_divisor: u32,
    /// Lower bound on the adaptive block size.
    pub min_block: u32,
    /// Offset subtracted from the local mean; pixels darker than
    /// `mean - offset` become foreground.
    pub offset: i16,
    /// Bottom-hat kernel size = width / this divisor.
    pub hat_divisor: u32,
    /// Fixed intensity cutoff applied to the bottom-hat response.
    pub hat_threshold: u8,
    /// Whether the bottom-hat path runs at all.
    pub use_bottom_hat: bool,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self {
            block_divisor: 30,
            min_block: 11,
            offset: 2,
            hat_divisor: 50,
            hat_threshold: 15,
            use_bottom_hat: true,
        }
    }
}

/// Morphological conditioning settings. The closing-kernel divisor is
/// per-category policy data (see [`crate::category_policy`]); only the
/// bounds live here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MorphologyParams {
    /// Opening kernel side (square).
    pub open_kernel: usize,
    /// Lower bound on the closing kernel side.
    pub min_close_kernel: usize,
}

impl Default for MorphologyParams {
    fn default() -> Self {
        Self {
            open_kernel: 3,
            min_close_kernel: 3,
        }
    }
}

/// Fragment filtering after contour tracing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FragmentParams {
    /// Keep at most this many fragments (longest first).
    pub max_fragments: usize,
    /// Minimum fragment arc length as a fraction of `max(width, height)`.
    pub min_length_frac: f32,
}

impl Default for FragmentParams {
    fn default() -> Self {
        Self {
            max_fragments: 3,
            min_length_frac: 0.08,
        }
    }
}

/// Greedy endpoint-stitching settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StitchParams {
    /// Maximum endpoint gap to bridge, as a fraction of `max(width, height)`.
    pub max_gap_frac: f32,
}

impl Default for StitchParams {
    fn default() -> Self {
        Self { max_gap_frac: 0.15 }
    }
}

/// Confidence normalization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfidenceParams {
    /// Path length is normalized by `diagonal * k`; observed pipeline
    /// variants used 0.3–0.5.
    pub k: f32,
}

impl Default for ConfidenceParams {
    fn default() -> Self {
        Self { k: 0.4 }
    }
}

/// Aggregate settings for the whole extraction pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExtractorParams {
    #[serde(default)]
    pub enhance: EnhanceParams,
    #[serde(default)]
    pub binarize: BinarizeParams,
    #[serde(default)]
    pub morphology: MorphologyParams,
    #[serde(default)]
    pub fragments: FragmentParams,
    #[serde(default)]
    pub stitch: StitchParams,
    #[serde(default)]
    pub confidence: ConfidenceParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_variant() {
        let p = ExtractorParams::default();
        assert_eq!(p.binarize.block_divisor, 30);
        assert_eq!(p.binarize.min_block, 11);
        assert_eq!(p.fragments.max_fragments, 3);
        assert!((p.stitch.max_gap_frac - 0.15).abs() < 1e-6);
        assert!((p.confidence.k - 0.4).abs() < 1e-6);
    }

    #[test]
    fn params_deserialize_with_partial_overrides() {
        let p: ExtractorParams =
            serde_json::from_str(r#"{"confidence": {"k": 0.3}}"#).unwrap();
        assert!((p.confidence.k - 0.3).abs() < 1e-6);
        assert_eq!(p.binarize.block_divisor, 30);
    }
}

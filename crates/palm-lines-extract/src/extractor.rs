//! End-to-end palm-line extraction: one independent mask → binarize →
//! condition → skeletonize → stitch chain per line category.

use rayon::prelude::*;

use palm_lines_core::{GrayImage, Landmarks, LineCategory, LineDetection, PalmLinesResult, RgbImageView};

use crate::binarize::binarize;
use crate::enhance::enhance;
use crate::fragments::extract_fragments;
use crate::morphology::{close, open, Kernel};
use crate::params::ExtractorParams;
use crate::score::score_path;
use crate::skeleton::skeletonize;
use crate::stitch::{longest_path, stitch_fragments};
use crate::zones::{build_zone_mask, category_policy};

/// Errors produced by the extraction entry point.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("palm region is empty ({width}x{height})")]
    EmptyRegion { width: usize, height: usize },
}

/// Stateless extraction pipeline; all tuning lives in the params struct
/// passed at construction.
pub struct PalmLineExtractor {
    params: ExtractorParams,
}

impl PalmLineExtractor {
    pub fn new(params: ExtractorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ExtractorParams {
        &self.params
    }

    /// Extract all three palm lines from the ROI.
    ///
    /// The enhanced grayscale raster is shared read-only; the three
    /// category chains run in parallel and cannot fail one another — a
    /// degenerate category simply comes back "not detected".
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip_all, fields(width = roi.width, height = roi.height))
    )]
    pub fn extract(
        &self,
        roi: &RgbImageView<'_>,
        landmarks: &Landmarks,
    ) -> Result<PalmLinesResult, ExtractError> {
        if roi.width == 0 || roi.height == 0 {
            return Err(ExtractError::EmptyRegion {
                width: roi.width,
                height: roi.height,
            });
        }

        let enhanced = enhance(roi, &self.params.enhance);

        let detections: Vec<LineDetection> = LineCategory::ALL
            .par_iter()
            .map(|&category| self.extract_category(&enhanced, landmarks, category))
            .collect();

        let mut result = PalmLinesResult::empty(roi.width as u32, roi.height as u32);
        for det in detections {
            let category = det.category;
            *result.get_mut(category) = det;
        }
        Ok(result)
    }

    /// Run one category chain over an already-enhanced grayscale raster.
    pub fn extract_category(
        &self,
        enhanced: &GrayImage,
        landmarks: &Landmarks,
        category: LineCategory,
    ) -> LineDetection {
        let size = (enhanced.width as u32, enhanced.height as u32);

        let mask = build_zone_mask(category, landmarks, size);
        if mask.is_zero() {
            log::info!("{category}: no usable zone, marked not detected");
            return LineDetection::not_detected(category);
        }

        let binary = binarize(enhanced, &mask, &self.params.binarize);
        let cleaned = self.condition(&binary, category);
        let skeleton = skeletonize(&cleaned);

        let fragments = extract_fragments(&skeleton, &self.params.fragments);
        if fragments.is_empty() {
            log::info!("{category}: no fragments above length filter");
            return LineDetection::not_detected(category);
        }

        let paths = stitch_fragments(fragments, size, &self.params.stitch);
        let Some(path) = longest_path(paths) else {
            return LineDetection::not_detected(category);
        };

        let confidence = score_path(&path, size, &self.params.confidence);
        log::info!(
            "{category}: stitched {} points, confidence {confidence:.3}",
            path.len()
        );
        LineDetection {
            category,
            path,
            confidence,
            color: category.color(),
        }
    }

    /// Morphological conditioning: opening removes speckle, closing
    /// bridges gaps with the category's kernel size.
    pub fn condition(&self, binary: &GrayImage, category: LineCategory) -> GrayImage {
        let m = &self.params.morphology;
        let opened = open(binary, &Kernel::rect(m.open_kernel, m.open_kernel));

        let divisor = category_policy(category).closing_divisor;
        let k = (binary.width as u32 / divisor.max(1)).max(m.min_close_kernel as u32) as usize;
        close(&opened, &Kernel::ellipse(k, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::tests::test_landmarks;

    fn flat_roi(w: usize, h: usize, value: u8) -> Vec<u8> {
        vec![value; w * h * 3]
    }

    #[test]
    fn zero_sized_region_is_an_error() {
        let extractor = PalmLineExtractor::new(ExtractorParams::default());
        let roi = RgbImageView::from_raw(0, 0, &[]).unwrap();
        let err = extractor.extract(&roi, &Landmarks::default()).unwrap_err();
        assert!(matches!(err, ExtractError::EmptyRegion { .. }));
    }

    #[test]
    fn featureless_palm_detects_nothing() {
        let extractor = PalmLineExtractor::new(ExtractorParams::default());
        let pixels = flat_roi(200, 200, 170);
        let roi = RgbImageView::from_raw(200, 200, &pixels).unwrap();
        let result = extractor.extract(&roi, &test_landmarks()).unwrap();
        for det in result.iter() {
            assert!(!det.detected());
            assert_eq!(det.confidence, 0.0);
        }
    }

    #[test]
    fn truncated_landmarks_disable_every_category() {
        let extractor = PalmLineExtractor::new(ExtractorParams::default());
        let pixels = flat_roi(64, 64, 128);
        let roi = RgbImageView::from_raw(64, 64, &pixels).unwrap();
        let lm = Landmarks::from_pairs(&[(1, 1), (2, 2)]);
        let result = extractor.extract(&roi, &lm).unwrap();
        for det in result.iter() {
            assert!(!det.detected());
        }
    }

    #[test]
    fn dark_crease_in_heart_zone_is_detected() {
        // Bright palm with a 6px-thick dark crease across the heart zone.
        let (w, h) = (200usize, 200usize);
        let mut pixels = flat_roi(w, h, 180);
        for y in 82..88 {
            for x in 78..150 {
                let i = (y * w + x) * 3;
                pixels[i] = 60;
                pixels[i + 1] = 60;
                pixels[i + 2] = 60;
            }
        }
        let roi = RgbImageView::from_raw(w, h, &pixels).unwrap();
        let extractor = PalmLineExtractor::new(ExtractorParams::default());
        let result = extractor.extract(&roi, &test_landmarks()).unwrap();

        let heart = &result.heart;
        assert!(heart.detected(), "heart line should be found");
        assert!(
            heart.confidence > 0.3,
            "confidence too low: {}",
            heart.confidence
        );
        for det in result.iter() {
            assert!((0.0..=1.0).contains(&det.confidence));
        }
    }

    #[test]
    fn condition_bridges_a_small_gap() {
        let extractor = PalmLineExtractor::new(ExtractorParams::default());
        let mut binary = GrayImage::zeros(120, 60);
        // Two thick dashes with a 2px gap at x=60.
        for y in 28..33 {
            for x in (30..60).chain(62..90) {
                binary.set(x, y, 255);
            }
        }
        let cleaned = extractor.condition(&binary, LineCategory::Heart);
        assert_ne!(cleaned.get(60, 30), 0, "closing should bridge the gap");
        assert_ne!(cleaned.get(61, 30), 0);
    }
}

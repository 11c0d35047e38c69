//! End-to-end helpers from `image::RgbImage` (feature `image`).

use serde::{Deserialize, Serialize};

use palm_lines_core::{Landmarks, PalmLinesResult, RgbImageView};
use palm_lines_extract::{ExtractError, ExtractorParams, PalmLineExtractor};

use crate::features::{extract_features, PalmFeatures};
use crate::reading::{reading_from_features, PalmReading};

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Convert an `image::RgbImage` into the lightweight core view type.
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Load an image from disk as RGB.
pub fn load_rgb(path: &std::path::Path) -> Result<::image::RgbImage, DetectError> {
    Ok(::image::ImageReader::open(path)?.decode()?.to_rgb8())
}

/// Run the extraction pipeline on an in-memory ROI.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip_all, fields(width = img.width(), height = img.height()))
)]
pub fn extract_palm_lines(
    img: &::image::RgbImage,
    landmarks: &Landmarks,
    params: ExtractorParams,
) -> Result<PalmLinesResult, DetectError> {
    let extractor = PalmLineExtractor::new(params);
    Ok(extractor.extract(&rgb_view(img), landmarks)?)
}

/// Lines, features and reading for one palm image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PalmAnalysis {
    pub lines: PalmLinesResult,
    pub features: PalmFeatures,
    pub reading: PalmReading,
}

/// Extraction plus the downstream feature and reading stages in one call.
pub fn analyze_palm(
    img: &::image::RgbImage,
    landmarks: &Landmarks,
    params: ExtractorParams,
) -> Result<PalmAnalysis, DetectError> {
    let lines = extract_palm_lines(img, landmarks, params)?;
    let features = extract_features(&lines);
    let reading = reading_from_features(&features);
    Ok(PalmAnalysis {
        lines,
        features,
        reading,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_flat_image_reports_nothing_detected() {
        let img = ::image::RgbImage::from_pixel(64, 64, ::image::Rgb([140, 120, 110]));
        let analysis =
            analyze_palm(&img, &Landmarks::default(), ExtractorParams::default()).unwrap();
        assert!(!analysis.lines.life.detected());
        assert!(analysis.features.life.is_none());
        assert_eq!(analysis.reading.life.feature, "not detected");
    }

    #[test]
    fn zero_sized_image_surfaces_the_extract_error() {
        let img = ::image::RgbImage::new(0, 0);
        let err = extract_palm_lines(&img, &Landmarks::default(), ExtractorParams::default())
            .unwrap_err();
        assert!(matches!(err, DetectError::Extract(_)));
    }
}

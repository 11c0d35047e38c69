//! Manual line correction: externally-authored point sequences replace
//! pipeline output per category and are re-scored and re-featurized
//! through the same code path as stitched paths.

use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use palm_lines_core::{LineCategory, PalmLinesResult, Polyline};
use palm_lines_extract::{score_path, ConfidenceParams};

/// Persisted correction document: replacement point sequences per line.
///
/// Categories absent from `lines` keep their pipeline result; an empty
/// sequence clears the line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectedLines {
    /// Source image the points refer to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    pub lines: BTreeMap<LineCategory, Vec<[i32; 2]>>,
}

impl CorrectedLines {
    pub fn set(&mut self, category: LineCategory, points: Vec<[i32; 2]>) {
        self.lines.insert(category, points);
    }
}

/// Apply corrections to a detection result, re-scoring each replaced path
/// against the region diagonal.
pub fn apply_corrections(
    result: &mut PalmLinesResult,
    corrections: &CorrectedLines,
    confidence: &ConfidenceParams,
) {
    let region = (result.width, result.height);
    for (&category, points) in &corrections.lines {
        let path = Polyline::new(
            points
                .iter()
                .map(|&[x, y]| Point2::new(x, y))
                .collect(),
        );
        let det = result.get_mut(category);
        det.confidence = score_path(&path, region, confidence);
        det.path = path;
        log::info!(
            "{category}: manually corrected to {} points, confidence {:.3}",
            det.path.len(),
            det.confidence
        );
    }
}

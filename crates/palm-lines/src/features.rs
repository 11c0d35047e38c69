//! Numeric line features computed from stitched (or manually corrected)
//! paths. These are the inputs to the reading generator and the values
//! persisted alongside detections.

use serde::{Deserialize, Serialize};

use palm_lines_core::{fit_line, simplify_rdp, LineDetection, PalmLinesResult};

/// Life-line metrics: normalized length and a bounding-box width ratio
/// standing in for arc curvature.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifeLineFeatures {
    pub norm_len: f32,
    pub curvature: f32,
}

/// Head-line metrics: normalized length and best-fit line slope.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeadLineFeatures {
    pub norm_len: f32,
    pub slope: f32,
}

/// Heart-line metrics: normalized length and the simplified vertex count
/// as a complexity proxy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeartLineFeatures {
    pub norm_len: f32,
    pub complexity: usize,
}

/// Per-palm feature set; `None` marks a line that was not detected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PalmFeatures {
    pub life: Option<LifeLineFeatures>,
    pub head: Option<HeadLineFeatures>,
    pub heart: Option<HeartLineFeatures>,
}

/// Compute all line features from a detection result.
pub fn extract_features(result: &PalmLinesResult) -> PalmFeatures {
    PalmFeatures {
        life: life_features(&result.life, result.width, result.height),
        head: head_features(&result.head, result.width),
        heart: heart_features(&result.heart, result.width),
    }
}

fn life_features(det: &LineDetection, width: u32, height: u32) -> Option<LifeLineFeatures> {
    if !det.detected() || width.max(height) == 0 {
        return None;
    }
    let norm_len = det.path.arc_length() / width.max(height) as f32;
    let curvature = det
        .path
        .bounding_box()
        .map(|bb| bb.width() as f32 / width as f32)
        .unwrap_or(0.0);
    Some(LifeLineFeatures { norm_len, curvature })
}

fn head_features(det: &LineDetection, width: u32) -> Option<HeadLineFeatures> {
    if !det.detected() || width == 0 {
        return None;
    }
    let norm_len = det.path.arc_length() / width as f32;
    // A fit can fail only for degenerate point clouds; report those as
    // flat rather than dropping the line.
    let slope = match fit_line(det.path.points()) {
        Some(fit) => fit.slope(),
        None => {
            log::warn!("head line has no usable line fit, reporting slope 0");
            0.0
        }
    };
    Some(HeadLineFeatures { norm_len, slope })
}

fn heart_features(det: &LineDetection, width: u32) -> Option<HeartLineFeatures> {
    if !det.detected() || width == 0 {
        return None;
    }
    let arc = det.path.arc_length();
    let norm_len = arc / width as f32;
    let complexity = simplify_rdp(det.path.points(), 0.01 * arc).len();
    Some(HeartLineFeatures {
        norm_len,
        complexity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use palm_lines_core::{LineCategory, Polyline};

    fn result_with(category: LineCategory, pairs: &[(i32, i32)]) -> PalmLinesResult {
        let mut result = PalmLinesResult::empty(200, 100);
        let det = result.get_mut(category);
        det.path = Polyline::from_pairs(pairs);
        det.confidence = 0.8;
        result
    }

    #[test]
    fn undetected_lines_have_no_features() {
        let features = extract_features(&PalmLinesResult::empty(200, 100));
        assert_eq!(features, PalmFeatures::default());
    }

    #[test]
    fn life_features_use_max_dimension_and_bbox_width() {
        let result = result_with(LineCategory::Life, &[(10, 10), (10, 90), (60, 90)]);
        let life = extract_features(&result).life.unwrap();
        // Arc 80 + 50 = 130, normalized by max(200, 100).
        assert_relative_eq!(life.norm_len, 130.0 / 200.0);
        assert_relative_eq!(life.curvature, 50.0 / 200.0);
    }

    #[test]
    fn head_slope_follows_the_fitted_direction() {
        let pairs: Vec<(i32, i32)> = (0..40).map(|i| (i, i)).collect();
        let result = result_with(LineCategory::Head, &pairs);
        let head = extract_features(&result).head.unwrap();
        assert_relative_eq!(head.slope, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn heart_complexity_counts_simplified_vertices() {
        // A straight heart line collapses to its two endpoints.
        let pairs: Vec<(i32, i32)> = (0..60).map(|i| (i, 40)).collect();
        let result = result_with(LineCategory::Heart, &pairs);
        let heart = extract_features(&result).heart.unwrap();
        assert_eq!(heart.complexity, 2);
        assert_relative_eq!(heart.norm_len, 59.0 / 200.0);
    }

    #[test]
    fn zig_zag_heart_line_is_more_complex_than_straight() {
        let zig: Vec<(i32, i32)> = (0..60)
            .map(|i| (i, if (i / 10) % 2 == 0 { 40 } else { 55 }))
            .collect();
        let result = result_with(LineCategory::Heart, &zig);
        let heart = extract_features(&result).heart.unwrap();
        assert!(heart.complexity > 4);
    }
}

//! Detection confidence: stitched path length normalized against the
//! region diagonal.

use palm_lines_core::Polyline;

use crate::params::ConfidenceParams;

/// `min(1, arc_length / (diagonal · k))`; an empty path (or degenerate
/// region) scores exactly 0.
pub fn score_path(path: &Polyline, region: (u32, u32), params: &ConfidenceParams) -> f32 {
    let (width, height) = region;
    let diagonal = ((width as f32).powi(2) + (height as f32).powi(2)).sqrt();
    if path.is_empty() || diagonal <= 0.0 || params.k <= 0.0 {
        return 0.0;
    }
    (path.arc_length() / (diagonal * params.k)).min(1.0)
}

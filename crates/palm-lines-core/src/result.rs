//! Detection result types produced once per pipeline run and consumed by
//! feature extraction and rendering. Results are replaced wholesale on
//! re-run or manual correction, never mutated in place.

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;

/// The three canonical palm lines.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCategory {
    Life,
    Head,
    Heart,
}

impl LineCategory {
    pub const ALL: [LineCategory; 3] = [LineCategory::Life, LineCategory::Head, LineCategory::Heart];

    /// Fixed display color (RGB).
    pub fn color(self) -> [u8; 3] {
        match self {
            LineCategory::Life => [255, 0, 0],
            LineCategory::Head => [0, 255, 0],
            LineCategory::Heart => [0, 0, 255],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineCategory::Life => "life",
            LineCategory::Head => "head",
            LineCategory::Heart => "heart",
        }
    }
}

impl std::fmt::Display for LineCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted (or manually supplied) palm line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineDetection {
    pub category: LineCategory,
    /// Stitched path; empty when the line was not found.
    pub path: Polyline,
    /// Normalized [0, 1] detection confidence.
    pub confidence: f32,
    /// Fixed display color for the category (RGB).
    pub color: [u8; 3],
}

impl LineDetection {
    /// An empty "not detected" result for the category.
    pub fn not_detected(category: LineCategory) -> Self {
        Self {
            category,
            path: Polyline::default(),
            confidence: 0.0,
            color: category.color(),
        }
    }

    pub fn detected(&self) -> bool {
        !self.path.is_empty()
    }
}

/// The full per-image result: one detection per line category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PalmLinesResult {
    pub life: LineDetection,
    pub head: LineDetection,
    pub heart: LineDetection,
    /// ROI dimensions the paths are expressed in.
    pub width: u32,
    pub height: u32,
}

impl PalmLinesResult {
    /// All-empty result for a region.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            life: LineDetection::not_detected(LineCategory::Life),
            head: LineDetection::not_detected(LineCategory::Head),
            heart: LineDetection::not_detected(LineCategory::Heart),
            width,
            height,
        }
    }

    pub fn get(&self, category: LineCategory) -> &LineDetection {
        match category {
            LineCategory::Life => &self.life,
            LineCategory::Head => &self.head,
            LineCategory::Heart => &self.heart,
        }
    }

    pub fn get_mut(&mut self, category: LineCategory) -> &mut LineDetection {
        match category {
            LineCategory::Life => &mut self.life,
            LineCategory::Head => &mut self.head,
            LineCategory::Heart => &mut self.heart,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineDetection> {
        [&self.life, &self.head, &self.heart].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&LineCategory::Life).unwrap(),
            "\"life\""
        );
    }

    #[test]
    fn empty_result_has_zero_confidence() {
        let res = PalmLinesResult::empty(100, 80);
        for det in res.iter() {
            assert!(!det.detected());
            assert_eq!(det.confidence, 0.0);
            assert_eq!(det.color, det.category.color());
        }
    }

    #[test]
    fn get_returns_matching_category() {
        let res = PalmLinesResult::empty(10, 10);
        for cat in LineCategory::ALL {
            assert_eq!(res.get(cat).category, cat);
        }
    }
}

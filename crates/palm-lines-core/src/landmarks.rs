//! Hand-landmark model: 21 anatomical keypoints in ROI-local pixel
//! coordinates, as produced by an external hand detector.
//!
//! The landmark *indices* are fixed by anatomy (MediaPipe convention);
//! the accessor is `Option`-returning because a detector may hand over a
//! truncated set and zone building must degrade softly rather than panic.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Anatomical landmark indices used by the zone geometry.
pub mod landmark {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const INDEX_MCP: usize = 5;
    pub const MIDDLE_MCP: usize = 9;
    pub const RING_MCP: usize = 13;
    pub const PINKY_MCP: usize = 17;
}

/// Which hand the detector saw. Carried through for callers; the line
/// geometry itself is handedness-agnostic.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// Ordered hand keypoints in ROI-local integer pixel coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmarks {
    points: Vec<Point2<i32>>,
}

impl Landmarks {
    /// Number of keypoints in a complete detection.
    pub const COUNT: usize = 21;

    pub fn new(points: Vec<Point2<i32>>) -> Self {
        Self { points }
    }

    /// Build from raw `(x, y)` pairs.
    pub fn from_pairs(pairs: &[(i32, i32)]) -> Self {
        Self {
            points: pairs.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() >= Self::COUNT
    }

    /// Keypoint at an anatomical index, `None` when the detector delivered
    /// fewer points.
    pub fn get(&self, index: usize) -> Option<Point2<i32>> {
        self.points.get(index).copied()
    }

    pub fn points(&self) -> &[Point2<i32>] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_fail_soft() {
        let lm = Landmarks::from_pairs(&[(0, 0), (5, 7)]);
        assert_eq!(lm.get(1), Some(Point2::new(5, 7)));
        assert_eq!(lm.get(landmark::PINKY_MCP), None);
        assert!(!lm.is_complete());
    }

    #[test]
    fn complete_set_reports_complete() {
        let pairs: Vec<(i32, i32)> = (0..21).map(|i| (i, i)).collect();
        let lm = Landmarks::from_pairs(&pairs);
        assert!(lm.is_complete());
        assert_eq!(lm.len(), Landmarks::COUNT);
    }

    #[test]
    fn serde_round_trip() {
        let lm = Landmarks::from_pairs(&[(3, 4), (5, 6)]);
        let json = serde_json::to_string(&lm).unwrap();
        let back: Landmarks = serde_json::from_str(&json).unwrap();
        assert_eq!(lm, back);
    }

    #[test]
    fn handedness_serializes_as_its_label() {
        assert_eq!(
            serde_json::to_string(&Handedness::Right).unwrap(),
            "\"Right\""
        );
        let left: Handedness = serde_json::from_str("\"Left\"").unwrap();
        assert_eq!(left, Handedness::Left);
    }
}

//! Rule-based reading text: a pure function from numeric line features to
//! a short label and prose per line. The thresholds mirror the feature
//! scales produced by `features::extract_features`.

use serde::{Deserialize, Serialize};

use crate::features::PalmFeatures;

/// Reading for one palm line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineReading {
    /// Short feature label, e.g. "long and deeply curved".
    pub feature: String,
    /// Prose interpretation.
    pub reading: String,
}

impl LineReading {
    fn not_detected() -> Self {
        Self {
            feature: "not detected".to_owned(),
            reading: "No reading available for this line.".to_owned(),
        }
    }
}

/// Complete palm reading, one entry per line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalmReading {
    pub life: LineReading,
    pub head: LineReading,
    pub heart: LineReading,
}

/// Map features to reading text with fixed thresholds.
pub fn reading_from_features(features: &PalmFeatures) -> PalmReading {
    PalmReading {
        life: features.life.map_or_else(LineReading::not_detected, |m| {
            let (len_label, len_text) = if m.norm_len > 0.6 {
                (
                    "long and deep",
                    "Vitality runs high; stamina and resilience come naturally.",
                )
            } else {
                (
                    "short",
                    "Pace yourself and guard your energy; rest is not optional.",
                )
            };
            let (arc_label, arc_text) = if m.curvature > 0.3 {
                (
                    "fully arched",
                    " An open, warm temperament draws people in.",
                )
            } else {
                (
                    "shallow arc",
                    " A reserved, careful nature prefers a steady life.",
                )
            };
            LineReading {
                feature: format!("{len_label}, {arc_label}"),
                reading: format!("{len_text}{arc_text}"),
            }
        }),
        head: features.head.map_or_else(LineReading::not_detected, |m| {
            let (len_label, len_text) = if m.norm_len > 0.5 {
                (
                    "long and clear",
                    "Thought runs deep; analysis comes before action.",
                )
            } else {
                (
                    "concise",
                    "Quick instincts and decisive judgement lead the way.",
                )
            };
            let (slope_label, slope_text) = if m.slope.abs() < 0.5 {
                (
                    "level",
                    " A practical, grounded mind with a head for numbers.",
                )
            } else {
                (
                    "sloping",
                    " Imagination and artistic sense color every decision.",
                )
            };
            LineReading {
                feature: format!("{len_label}, {slope_label}"),
                reading: format!("{len_text}{slope_text}"),
            }
        }),
        heart: features.heart.map_or_else(LineReading::not_detected, |m| {
            let (len_label, len_text) = if m.norm_len > 0.6 {
                (
                    "reaching the fingers",
                    "Feelings are rich and loyalty runs deep.",
                )
            } else {
                (
                    "stopping short",
                    "Affection is given carefully, with a cool head.",
                )
            };
            let (cx_label, cx_text) = if m.complexity > 10 {
                (
                    "branched",
                    " An eventful emotional life, rarely a dull moment.",
                )
            } else {
                (
                    "clean",
                    " Simple, sincere attachments matter most.",
                )
            };
            LineReading {
                feature: format!("{len_label}, {cx_label}"),
                reading: format!("{len_text}{cx_text}"),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{HeadLineFeatures, HeartLineFeatures, LifeLineFeatures};

    #[test]
    fn missing_features_produce_the_fallback() {
        let reading = reading_from_features(&PalmFeatures::default());
        assert_eq!(reading.life.feature, "not detected");
        assert_eq!(reading.head.feature, "not detected");
        assert_eq!(reading.heart.feature, "not detected");
    }

    #[test]
    fn long_curved_life_line_reads_as_vital() {
        let features = PalmFeatures {
            life: Some(LifeLineFeatures {
                norm_len: 0.8,
                curvature: 0.4,
            }),
            ..Default::default()
        };
        let reading = reading_from_features(&features);
        assert!(reading.life.feature.contains("long"));
        assert!(reading.life.feature.contains("arched"));
    }

    #[test]
    fn slope_threshold_splits_level_from_sloping() {
        let level = PalmFeatures {
            head: Some(HeadLineFeatures {
                norm_len: 0.4,
                slope: 0.2,
            }),
            ..Default::default()
        };
        let sloping = PalmFeatures {
            head: Some(HeadLineFeatures {
                norm_len: 0.4,
                slope: -0.9,
            }),
            ..Default::default()
        };
        assert!(reading_from_features(&level).head.feature.contains("level"));
        assert!(reading_from_features(&sloping)
            .head
            .feature
            .contains("sloping"));
    }

    #[test]
    fn complex_heart_line_reads_as_branched() {
        let features = PalmFeatures {
            heart: Some(HeartLineFeatures {
                norm_len: 0.7,
                complexity: 14,
            }),
            ..Default::default()
        };
        let reading = reading_from_features(&features);
        assert!(reading.heart.feature.contains("branched"));
    }
}

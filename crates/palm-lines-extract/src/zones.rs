//! Landmark-anchored zone masks.
//!
//! Each line category searches inside a polygon derived from hand
//! landmarks, so zone geometry follows hand size and pose instead of fixed
//! image coordinates. A missing landmark degrades to an all-zero mask; the
//! category then comes out "not detected" instead of failing the run.

use nalgebra::Point2;

use palm_lines_core::{landmark, GrayImage, Landmarks, LineCategory};

/// Per-category pipeline policy: the mask polygon rule and the
/// closing-kernel divisor for morphological conditioning.
///
/// Smaller closing kernels (larger divisors) on life/head zones avoid
/// bridging into adjacent anatomical lines; the heart zone tolerates a
/// larger kernel because neighbouring lines sit farther away.
#[derive(Clone, Copy)]
pub struct CategoryPolicy {
    pub closing_divisor: u32,
    pub mask_polygon: fn(&Landmarks, (u32, u32)) -> Option<Vec<Point2<f32>>>,
}

/// Indexed by `LineCategory` declaration order (life, head, heart).
static POLICIES: [CategoryPolicy; 3] = [
    CategoryPolicy {
        closing_divisor: 100,
        mask_polygon: life_polygon,
    },
    CategoryPolicy {
        closing_divisor: 100,
        mask_polygon: head_polygon,
    },
    CategoryPolicy {
        closing_divisor: 70,
        mask_polygon: heart_polygon,
    },
];

/// Policy lookup for a category.
pub fn category_policy(category: LineCategory) -> &'static CategoryPolicy {
    &POLICIES[category as usize]
}

#[inline]
fn pt(lm: &Landmarks, index: usize) -> Option<Point2<f32>> {
    lm.get(index).map(|p| Point2::new(p.x as f32, p.y as f32))
}

#[inline]
fn midpoint(a: Point2<f32>, b: Point2<f32>) -> Point2<f32> {
    Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// Mid-point of the thumb/index web.
fn web_point(lm: &Landmarks) -> Option<Point2<f32>> {
    Some(midpoint(
        pt(lm, landmark::THUMB_MCP)?,
        pt(lm, landmark::INDEX_MCP)?,
    ))
}

/// Mean of wrist, index base and pinky base.
fn palm_centroid(lm: &Landmarks) -> Option<Point2<f32>> {
    let p0 = pt(lm, landmark::WRIST)?;
    let p5 = pt(lm, landmark::INDEX_MCP)?;
    let p17 = pt(lm, landmark::PINKY_MCP)?;
    Some(Point2::new(
        (p0.x + p5.x + p17.x) / 3.0,
        (p0.y + p5.y + p17.y) / 3.0,
    ))
}

/// Life line: thumb-ball arc between wrist, thumb joints, the web point and
/// a point pulled halfway from the wrist toward the palm centroid.
fn life_polygon(lm: &Landmarks, _size: (u32, u32)) -> Option<Vec<Point2<f32>>> {
    let p0 = pt(lm, landmark::WRIST)?;
    let p1 = pt(lm, landmark::THUMB_CMC)?;
    let p2 = pt(lm, landmark::THUMB_MCP)?;
    let web = web_point(lm)?;
    let inner = midpoint(palm_centroid(lm)?, p0);
    Some(vec![p0, p1, p2, web, inner])
}

/// Head line: band from the web point across the palm toward a region
/// 10–30% of the canvas height below the pinky base, closed via the
/// centroid.
fn head_polygon(lm: &Landmarks, (_, height): (u32, u32)) -> Option<Vec<Point2<f32>>> {
    let web = web_point(lm)?;
    let p5 = pt(lm, landmark::INDEX_MCP)?;
    let p17 = pt(lm, landmark::PINKY_MCP)?;
    let c = palm_centroid(lm)?;
    let h = height as f32;
    Some(vec![
        web,
        p5,
        Point2::new(p17.x, p17.y + 0.1 * h),
        Point2::new(p17.x, p17.y + 0.3 * h),
        c,
    ])
}

/// Heart line: strip under the four finger bases, extended downward by 35%
/// of the index-to-pinky base span.
fn heart_polygon(lm: &Landmarks, _size: (u32, u32)) -> Option<Vec<Point2<f32>>> {
    let p5 = pt(lm, landmark::INDEX_MCP)?;
    let p9 = pt(lm, landmark::MIDDLE_MCP)?;
    let p13 = pt(lm, landmark::RING_MCP)?;
    let p17 = pt(lm, landmark::PINKY_MCP)?;
    let span = ((p5.x - p17.x).powi(2) + (p5.y - p17.y).powi(2)).sqrt();
    let d = 0.35 * span;
    Some(vec![
        p17,
        p13,
        p9,
        p5,
        Point2::new(p5.x, p5.y + d),
        Point2::new(p17.x, p17.y + d),
    ])
}

/// Build the binary zone mask for a category: 255 inside the landmark
/// polygon, 0 outside. Missing landmarks yield an all-zero mask.
pub fn build_zone_mask(
    category: LineCategory,
    landmarks: &Landmarks,
    size: (u32, u32),
) -> GrayImage {
    let (width, height) = size;
    let mut mask = GrayImage::zeros(width as usize, height as usize);

    let Some(polygon) = (category_policy(category).mask_polygon)(landmarks, size) else {
        log::debug!("{category}: landmark set incomplete, zone mask is empty");
        return mask;
    };

    fill_polygon(&mut mask, &polygon);
    mask
}

/// Even-odd scanline fill sampling at pixel centers.
fn fill_polygon(mask: &mut GrayImage, polygon: &[Point2<f32>]) {
    if polygon.len() < 3 {
        return;
    }

    for y in 0..mask.height {
        let ys = y as f32 + 0.5;
        let mut crossings: Vec<f32> = Vec::with_capacity(polygon.len());
        for i in 0..polygon.len() {
            let a = polygon[i];
            let b = polygon[(i + 1) % polygon.len()];
            // Half-open span so shared vertices are counted once.
            if (a.y <= ys) != (b.y <= ys) {
                crossings.push(a.x + (ys - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            let x0 = pair[0].max(0.0).round() as usize;
            let x1 = pair[1].min(mask.width as f32).round() as usize;
            for x in x0..x1.min(mask.width) {
                mask.set(x, y, 255);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A plausible open right palm on a 200×200 canvas.
    pub(crate) fn test_landmarks() -> Landmarks {
        let mut pairs = vec![(0, 0); 21];
        pairs[landmark::WRIST] = (100, 190);
        pairs[landmark::THUMB_CMC] = (60, 170);
        pairs[landmark::THUMB_MCP] = (40, 140);
        pairs[landmark::INDEX_MCP] = (70, 60);
        pairs[landmark::MIDDLE_MCP] = (100, 55);
        pairs[landmark::RING_MCP] = (130, 60);
        pairs[landmark::PINKY_MCP] = (155, 75);
        Landmarks::from_pairs(&pairs)
    }

    #[test]
    fn masks_are_nonempty_for_complete_landmarks() {
        let lm = test_landmarks();
        for cat in LineCategory::ALL {
            let mask = build_zone_mask(cat, &lm, (200, 200));
            assert!(mask.count_nonzero() > 0, "{cat} mask should be filled");
        }
    }

    #[test]
    fn truncated_landmarks_degrade_to_empty_mask() {
        let lm = Landmarks::from_pairs(&[(0, 0), (1, 1), (2, 2)]);
        for cat in LineCategory::ALL {
            let mask = build_zone_mask(cat, &lm, (100, 100));
            assert!(mask.is_zero(), "{cat} mask should be empty");
        }
    }

    #[test]
    fn fill_square_covers_interior_only() {
        let mut mask = GrayImage::zeros(10, 10);
        let square = [
            Point2::new(2.0, 2.0),
            Point2::new(8.0, 2.0),
            Point2::new(8.0, 8.0),
            Point2::new(2.0, 8.0),
        ];
        fill_polygon(&mut mask, &square);
        assert_eq!(mask.get(5, 5), 255);
        assert_eq!(mask.get(0, 0), 0);
        assert_eq!(mask.get(9, 5), 0);
        // 6×6 pixel centers fall inside the [2, 8) span.
        assert_eq!(mask.count_nonzero(), 36);
    }

    #[test]
    fn policy_table_matches_category_order() {
        assert_eq!(category_policy(LineCategory::Life).closing_divisor, 100);
        assert_eq!(category_policy(LineCategory::Head).closing_divisor, 100);
        assert_eq!(category_policy(LineCategory::Heart).closing_divisor, 70);
    }
}

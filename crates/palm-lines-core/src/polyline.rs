//! Polyline math shared by the extraction pipeline and its downstream
//! feature consumers: arc length, bounding boxes, a total-least-squares
//! line fit, and Ramer–Douglas–Peucker simplification.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[inline]
fn dist(a: Point2<i32>, b: Point2<i32>) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// An ordered open point sequence in integer pixel coordinates.
///
/// Used both for stitched detection paths and for externally-authored
/// (manually corrected) replacements; the two are indistinguishable to
/// downstream consumers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point2<i32>>,
}

impl Polyline {
    pub fn new(points: Vec<Point2<i32>>) -> Self {
        Self { points }
    }

    pub fn from_pairs(pairs: &[(i32, i32)]) -> Self {
        Self {
            points: pairs.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
        }
    }

    pub fn points(&self) -> &[Point2<i32>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2<i32>> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn head(&self) -> Option<Point2<i32>> {
        self.points.first().copied()
    }

    pub fn tail(&self) -> Option<Point2<i32>> {
        self.points.last().copied()
    }

    /// Open arc length: sum of consecutive Euclidean distances. Empty and
    /// single-point polylines have length 0.
    pub fn arc_length(&self) -> f32 {
        self.points.windows(2).map(|w| dist(w[0], w[1])).sum()
    }

    /// Axis-aligned bounding box, `None` when empty.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = *self.points.first()?;
        let mut bb = Aabb {
            min: first,
            max: first,
        };
        for p in &self.points[1..] {
            bb.min.x = bb.min.x.min(p.x);
            bb.min.y = bb.min.y.min(p.y);
            bb.max.x = bb.max.x.max(p.x);
            bb.max.y = bb.max.y.max(p.y);
        }
        Some(bb)
    }
}

/// Axis-aligned bounding box in pixel coordinates (inclusive corners).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point2<i32>,
    pub max: Point2<i32>,
}

impl Aabb {
    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y) as u32
    }
}

/// Total-least-squares line fit (principal axis of the point cloud).
#[derive(Clone, Copy, Debug)]
pub struct LineFit {
    pub centroid: Point2<f32>,
    /// Unit direction of the fitted line.
    pub direction: Vector2<f32>,
}

/// Slope magnitude reported for a (near-)vertical fit.
const VERTICAL_SLOPE: f32 = 100.0;

impl LineFit {
    /// Slope `dy/dx` of the fitted line. A vertical fit has no finite
    /// slope; it degrades to `±100.0` (sign of `dy`) and logs a warning.
    pub fn slope(&self) -> f32 {
        if self.direction.x.abs() < 1e-6 {
            log::warn!("degenerate vertical line fit, clamping slope magnitude");
            return VERTICAL_SLOPE.copysign(self.direction.y);
        }
        self.direction.y / self.direction.x
    }
}

/// Fit a line through `points` by principal-axis analysis of the 2×2
/// covariance. Returns `None` for fewer than 2 points.
pub fn fit_line(points: &[Point2<i32>]) -> Option<LineFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f32;
    let mut cx = 0.0f32;
    let mut cy = 0.0f32;
    for p in points {
        cx += p.x as f32;
        cy += p.y as f32;
    }
    cx /= n;
    cy /= n;

    let mut sxx = 0.0f32;
    let mut sxy = 0.0f32;
    let mut syy = 0.0f32;
    for p in points {
        let dx = p.x as f32 - cx;
        let dy = p.y as f32 - cy;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 && syy == 0.0 {
        // All points coincide.
        return None;
    }

    // Principal eigenvector angle of [[sxx, sxy], [sxy, syy]].
    let theta = 0.5 * (2.0 * sxy).atan2(sxx - syy);
    Some(LineFit {
        centroid: Point2::new(cx, cy),
        direction: Vector2::new(theta.cos(), theta.sin()),
    })
}

/// Ramer–Douglas–Peucker simplification of an open polyline.
///
/// Keeps endpoints; drops interior points closer than `epsilon` to the
/// chord. Inputs shorter than 3 points come back unchanged.
pub fn simplify_rdp(points: &[Point2<i32>], epsilon: f32) -> Vec<Point2<i32>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    rdp_mark(points, 0, points.len() - 1, epsilon.max(0.0), &mut keep);

    points
        .iter()
        .zip(&keep)
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect()
}

fn rdp_mark(points: &[Point2<i32>], first: usize, last: usize, epsilon: f32, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }

    let a = points[first];
    let b = points[last];
    let chord = Vector2::new((b.x - a.x) as f32, (b.y - a.y) as f32);
    let chord_len = chord.norm();

    let mut max_d = -1.0f32;
    let mut max_i = first;
    for i in (first + 1)..last {
        let p = points[i];
        let v = Vector2::new((p.x - a.x) as f32, (p.y - a.y) as f32);
        let d = if chord_len > 0.0 {
            (chord.x * v.y - chord.y * v.x).abs() / chord_len
        } else {
            v.norm()
        };
        if d > max_d {
            max_d = d;
            max_i = i;
        }
    }

    if max_d > epsilon {
        keep[max_i] = true;
        rdp_mark(points, first, max_i, epsilon, keep);
        rdp_mark(points, max_i, last, epsilon, keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn arc_length_of_straight_segment() {
        let p = Polyline::from_pairs(&[(0, 0), (3, 4), (6, 8)]);
        assert_relative_eq!(p.arc_length(), 10.0);
    }

    #[test]
    fn empty_and_single_point_have_zero_length() {
        assert_eq!(Polyline::default().arc_length(), 0.0);
        assert_eq!(Polyline::from_pairs(&[(5, 5)]).arc_length(), 0.0);
    }

    #[test]
    fn bounding_box_spans_extremes() {
        let p = Polyline::from_pairs(&[(2, 9), (7, 1), (4, 4)]);
        let bb = p.bounding_box().unwrap();
        assert_eq!((bb.min.x, bb.min.y), (2, 1));
        assert_eq!((bb.max.x, bb.max.y), (7, 9));
        assert_eq!(bb.width(), 5);
        assert_eq!(bb.height(), 8);
        assert!(Polyline::default().bounding_box().is_none());
    }

    #[test]
    fn fit_line_recovers_diagonal() {
        let pts: Vec<Point2<i32>> = (0..20).map(|i| Point2::new(i, 2 * i)).collect();
        let fit = fit_line(&pts).unwrap();
        assert_relative_eq!(fit.slope(), 2.0, epsilon = 1e-3);
    }

    #[test]
    fn vertical_fit_falls_back_to_clamped_slope() {
        let pts: Vec<Point2<i32>> = (0..10).map(|i| Point2::new(3, i)).collect();
        let fit = fit_line(&pts).unwrap();
        assert_relative_eq!(fit.slope().abs(), 100.0);
    }

    #[test]
    fn fit_line_needs_spread() {
        assert!(fit_line(&[Point2::new(1, 1)]).is_none());
        assert!(fit_line(&[Point2::new(1, 1), Point2::new(1, 1)]).is_none());
    }

    #[test]
    fn rdp_collapses_collinear_interior() {
        let pts: Vec<Point2<i32>> = (0..10).map(|i| Point2::new(i, 0)).collect();
        let simplified = simplify_rdp(&pts, 0.5);
        assert_eq!(simplified, vec![Point2::new(0, 0), Point2::new(9, 0)]);
    }

    #[test]
    fn rdp_keeps_a_corner() {
        let pts = [
            Point2::new(0, 0),
            Point2::new(5, 0),
            Point2::new(5, 5),
        ];
        let simplified = simplify_rdp(&pts, 0.5);
        assert_eq!(simplified.len(), 3);
    }
}

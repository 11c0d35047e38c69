//! Curve fragments: external boundary traces of the disconnected skeleton
//! components, filtered down to the few longest candidates.

use std::collections::HashSet;

use nalgebra::Point2;

use palm_lines_core::{GrayImage, Polyline};

use crate::params::FragmentParams;

/// One connected skeleton branch as an ordered point sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveFragment {
    points: Vec<Point2<i32>>,
    arc_length: f32,
}

impl CurveFragment {
    pub fn new(points: Vec<Point2<i32>>) -> Self {
        let arc_length = Polyline::new(points.clone()).arc_length();
        Self { points, arc_length }
    }

    pub fn points(&self) -> &[Point2<i32>] {
        &self.points
    }

    pub fn arc_length(&self) -> f32 {
        self.arc_length
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Point2<i32>> {
        self.points
    }
}

/// Clockwise Moore neighbourhood starting west.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// Trace external contours of the skeleton into curve fragments, longest
/// first; keep at most `max_fragments` whose arc length exceeds
/// `min_length_frac · max(width, height)`.
pub fn extract_fragments(skeleton: &GrayImage, params: &FragmentParams) -> Vec<CurveFragment> {
    let mut visited = vec![false; skeleton.width * skeleton.height];
    let mut fragments: Vec<CurveFragment> = Vec::new();

    for y in 0..skeleton.height {
        for x in 0..skeleton.width {
            if skeleton.data[y * skeleton.width + x] == 0 || visited[y * skeleton.width + x] {
                continue;
            }
            let start = Point2::new(x as i32, y as i32);
            let contour = trace_boundary(skeleton, start);
            mark_component(skeleton, start, &mut visited);
            fragments.push(CurveFragment::new(contour));
        }
    }

    fragments.sort_by(|a, b| b.arc_length.total_cmp(&a.arc_length));
    fragments.truncate(params.max_fragments);

    let min_len = params.min_length_frac * skeleton.width.max(skeleton.height) as f32;
    fragments.retain(|f| f.arc_length > min_len);

    log::debug!(
        "{} fragment(s) survive the {min_len:.1}px length filter",
        fragments.len()
    );
    fragments
}

/// Moore-neighbour boundary trace with the Jacobi stopping criterion.
///
/// Each boundary pixel is recorded on first visit only, so a 1-pixel-wide
/// curve comes out as a single open sweep from one end to the other
/// instead of a doubled out-and-back loop.
fn trace_boundary(img: &GrayImage, start: Point2<i32>) -> Vec<Point2<i32>> {
    let mut points = trace_unique(img, start);

    // Skipping revisited pixels means that once the walk turns back along
    // an already-recorded side, any later first-visit pixel shows up as a
    // spatial jump. Cut there so the fragment stays a connected polyline
    // and its tail is the trace's turnaround point.
    let cut = points
        .windows(2)
        .position(|w| (w[1].x - w[0].x).abs() > 1 || (w[1].y - w[0].y).abs() > 1);
    if let Some(i) = cut {
        points.truncate(i + 1);
    }
    points
}

fn trace_unique(img: &GrayImage, start: Point2<i32>) -> Vec<Point2<i32>> {
    let fg = |p: Point2<i32>| img.get(p.x, p.y) != 0;

    let mut points = vec![start];
    let mut seen: HashSet<(i32, i32)> = HashSet::from([(start.x, start.y)]);

    // `start` is first in scan order, so its W/NW/N/NE neighbours are
    // background and the search below begins cleanly from west.
    let mut backtrack = 0usize;
    let mut cur = start;
    let mut first_dir: Option<usize> = None;

    // Bounded walk; the Jacobi criterion fires long before this on any
    // well-formed raster.
    let max_steps = 8 * img.width * img.height;
    for _ in 0..max_steps {
        let mut found = None;
        for i in 1..=8 {
            let dir = (backtrack + i) % 8;
            let (dx, dy) = NEIGHBORS[dir];
            if fg(Point2::new(cur.x + dx, cur.y + dy)) {
                found = Some(dir);
                break;
            }
        }
        let Some(dir) = found else {
            break; // isolated pixel
        };

        match first_dir {
            None => first_dir = Some(dir),
            Some(first) => {
                if cur == start && dir == first {
                    break; // full loop closed
                }
            }
        }

        let (dx, dy) = NEIGHBORS[dir];
        cur = Point2::new(cur.x + dx, cur.y + dy);
        backtrack = (dir + 4) % 8;
        if seen.insert((cur.x, cur.y)) {
            points.push(cur);
        }
    }

    points
}

/// Flood-mark the 8-connected component of `start` as visited.
fn mark_component(img: &GrayImage, start: Point2<i32>, visited: &mut [bool]) {
    let mut stack = vec![start];
    visited[start.y as usize * img.width + start.x as usize] = true;
    while let Some(p) = stack.pop() {
        for (dx, dy) in NEIGHBORS {
            let q = Point2::new(p.x + dx, p.y + dy);
            if q.x < 0 || q.y < 0 || q.x >= img.width as i32 || q.y >= img.height as i32 {
                continue;
            }
            let idx = q.y as usize * img.width + q.x as usize;
            if img.data[idx] != 0 && !visited[idx] {
                visited[idx] = true;
                stack.push(q);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_hline(img: &mut GrayImage, y: usize, x0: usize, x1: usize) {
        for x in x0..x1 {
            img.set(x, y, 255);
        }
    }

    #[test]
    fn single_line_traces_once_end_to_end() {
        let mut img = GrayImage::zeros(40, 20);
        draw_hline(&mut img, 5, 2, 12);
        let frags = extract_fragments(&img, &FragmentParams::default());
        assert_eq!(frags.len(), 1);
        let f = &frags[0];
        assert_eq!(f.len(), 10);
        assert_eq!(f.points()[0], Point2::new(2, 5));
        assert_eq!(*f.points().last().unwrap(), Point2::new(11, 5));
        assert!((f.arc_length() - 9.0).abs() < 1e-5);
    }

    #[test]
    fn isolated_pixels_are_filtered_out() {
        let mut img = GrayImage::zeros(50, 50);
        img.set(10, 10, 255);
        img.set(30, 30, 255);
        let frags = extract_fragments(&img, &FragmentParams::default());
        assert!(frags.is_empty());
    }

    #[test]
    fn short_fragments_fall_below_length_filter() {
        // min length = 0.08 * 100 = 8px.
        let mut img = GrayImage::zeros(100, 100);
        draw_hline(&mut img, 10, 0, 30); // length 29
        draw_hline(&mut img, 50, 0, 5); // length 4
        let frags = extract_fragments(&img, &FragmentParams::default());
        assert_eq!(frags.len(), 1);
        assert!(frags[0].arc_length() > 20.0);
    }

    #[test]
    fn keeps_at_most_three_longest() {
        let mut img = GrayImage::zeros(100, 120);
        draw_hline(&mut img, 10, 0, 80);
        draw_hline(&mut img, 30, 0, 70);
        draw_hline(&mut img, 50, 0, 60);
        draw_hline(&mut img, 70, 0, 50);
        draw_hline(&mut img, 90, 0, 40);
        let frags = extract_fragments(&img, &FragmentParams::default());
        assert_eq!(frags.len(), 3);
        assert!((frags[0].arc_length() - 79.0).abs() < 1e-5);
        assert!((frags[2].arc_length() - 59.0).abs() < 1e-5);
    }

    #[test]
    fn fragments_sorted_by_length_descending() {
        let mut img = GrayImage::zeros(200, 40);
        draw_hline(&mut img, 5, 0, 30);
        draw_hline(&mut img, 20, 0, 100);
        let frags = extract_fragments(&img, &FragmentParams::default());
        assert_eq!(frags.len(), 2);
        assert!(frags[0].arc_length() > frags[1].arc_length());
    }

    #[test]
    fn side_bump_does_not_teleport_the_tail() {
        // A 1-px line with one extra pixel hanging below it: the bump is
        // only reachable on the return sweep and must not extend the
        // recorded fragment past the line's far end.
        let mut img = GrayImage::zeros(40, 20);
        draw_hline(&mut img, 5, 2, 12);
        img.set(7, 6, 255);
        let frags = extract_fragments(&img, &FragmentParams::default());
        assert_eq!(frags.len(), 1);
        let f = &frags[0];
        assert_eq!(f.points()[0], Point2::new(2, 5));
        assert_eq!(*f.points().last().unwrap(), Point2::new(11, 5));
    }

    #[test]
    fn diagonal_line_is_one_fragment() {
        let mut img = GrayImage::zeros(60, 60);
        for i in 5..35 {
            img.set(i, i, 255);
        }
        let frags = extract_fragments(&img, &FragmentParams::default());
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].len(), 30);
    }
}

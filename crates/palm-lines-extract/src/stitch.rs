//! Greedy nearest-endpoint stitching of curve fragments into continuous
//! paths.

use nalgebra::Point2;

use palm_lines_core::Polyline;

use crate::fragments::CurveFragment;
use crate::params::StitchParams;

#[inline]
fn dist(a: Point2<i32>, b: Point2<i32>) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Splice {
    Append,
    AppendRev,
    Prepend,
    PrependRev,
}

/// Merge fragments into maximal continuous paths.
///
/// The longest fragment seeds a path; every remaining fragment offers four
/// endpoint pairings (path tail to fragment head/tail, path head to
/// fragment tail/head) and the globally nearest pairing under
/// `max_gap_frac · max(width, height)` is spliced in, reversing the
/// fragment when its far end matched. The scan repeats until no fragment
/// is in range, then the next seed starts a new path.
///
/// Exact distance ties resolve to the first candidate in scan order:
/// append, append-reversed, prepend, prepend-reversed, earlier pool index
/// first. The order is deterministic but carries no meaning beyond
/// stability across runs.
pub fn stitch_fragments(
    fragments: Vec<CurveFragment>,
    region: (u32, u32),
    params: &StitchParams,
) -> Vec<Polyline> {
    let (width, height) = region;
    let threshold = params.max_gap_frac * width.max(height) as f32;

    let mut pool: Vec<Vec<Point2<i32>>> = fragments
        .into_iter()
        .filter(|f| !f.is_empty())
        .map(CurveFragment::into_points)
        .collect();
    // Stable sort: equal-size fragments keep their incoming order.
    pool.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut paths = Vec::new();
    while !pool.is_empty() {
        let mut current = pool.remove(0);

        let mut changed = true;
        while changed {
            changed = false;

            let head = current[0];
            let tail = current[current.len() - 1];

            let mut best: Option<(f32, usize, Splice)> = None;
            for (i, seg) in pool.iter().enumerate() {
                let s_head = seg[0];
                let s_tail = seg[seg.len() - 1];
                let candidates = [
                    (Splice::Append, dist(tail, s_head)),
                    (Splice::AppendRev, dist(tail, s_tail)),
                    (Splice::Prepend, dist(head, s_tail)),
                    (Splice::PrependRev, dist(head, s_head)),
                ];
                for (splice, d) in candidates {
                    if d < threshold && best.is_none_or(|(bd, _, _)| d < bd) {
                        best = Some((d, i, splice));
                    }
                }
            }

            if let Some((gap, idx, splice)) = best {
                let mut seg = pool.remove(idx);
                log::trace!("splicing fragment over a {gap:.1}px gap ({splice:?})");
                match splice {
                    Splice::Append => current.extend(seg),
                    Splice::AppendRev => current.extend(seg.into_iter().rev()),
                    Splice::Prepend => {
                        seg.extend(current);
                        current = seg;
                    }
                    Splice::PrependRev => {
                        seg.reverse();
                        seg.extend(current);
                        current = seg;
                    }
                }
                changed = true;
            }
        }

        paths.push(Polyline::new(current));
    }

    paths
}

/// The single longest path by arc length, if any.
pub fn longest_path(paths: Vec<Polyline>) -> Option<Polyline> {
    paths
        .into_iter()
        .max_by(|a, b| a.arc_length().total_cmp(&b.arc_length()))
}

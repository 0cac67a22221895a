//! Convex hull merging for horizontally separated site sets.
//!
//! Both input hulls are counter-clockwise and the left hull lies wholly to
//! the left of the right hull. The two bridging tangents are found with the
//! classical rotating-pair search; the union hull keeps the outer arcs of
//! both inputs and drops everything between the tangents.

use crate::geometry::ray_side;
use crate::types::Site;

/// Result of merging two disjoint convex hulls.
#[derive(Debug, Clone)]
pub struct HullMerge {
    /// Union hull, counter-clockwise.
    pub hull: Vec<Site>,
    /// Upper tangent `(left, right)`: every site of both hulls lies on or
    /// below its line. The dividing chain starts here.
    pub upper: (Site, Site),
    /// Lower tangent `(left, right)`: every site lies on or above its line.
    /// The dividing chain terminates here.
    pub lower: (Site, Site),
}

/// Merge two horizontally separated counter-clockwise hulls.
pub fn merge_hulls(left: &[Site], right: &[Site]) -> HullMerge {
    debug_assert!(!left.is_empty() && !right.is_empty());

    let (ul, ur) = tangent(left, right, 1);
    let (ql, qr) = tangent(left, right, -1);

    // Union hull: left arc from the upper tangent counter-clockwise down to
    // the lower tangent, then the right arc from the lower tangent counter-
    // clockwise up to the upper tangent.
    let mut hull = Vec::with_capacity(left.len() + right.len());
    let mut i = ul;
    hull.push(left[i]);
    while i != ql {
        i = (i + 1) % left.len();
        hull.push(left[i]);
    }
    let mut j = qr;
    hull.push(right[j]);
    while j != ur {
        j = (j + 1) % right.len();
        hull.push(right[j]);
    }

    HullMerge {
        hull,
        upper: (left[ul], right[ur]),
        lower: (left[ql], right[qr]),
    }
}

/// Rotating-pair tangent search. `side` is `1` for the upper tangent (no
/// hull point strictly left of the directed line `l -> r`) and `-1` for the
/// lower one. Returns indices into `left` and `right`.
fn tangent(left: &[Site], right: &[Site], side: i32) -> (usize, usize) {
    let mut l = rightmost(left);
    let mut r = leftmost(right);

    loop {
        let mut moved = false;

        // Advance r while one of its hull neighbors sticks out past the
        // candidate line.
        loop {
            let lp = left[l].pos.to_dvec2();
            let rp = right[r].pos.to_dvec2();
            let next = (r + 1) % right.len();
            let prev = (r + right.len() - 1) % right.len();
            if next != r && ray_side(lp, rp, right[next].pos.to_dvec2()) == side {
                r = next;
                moved = true;
            } else if prev != r && ray_side(lp, rp, right[prev].pos.to_dvec2()) == side {
                r = prev;
                moved = true;
            } else {
                break;
            }
        }

        // Likewise for l, against the settled r.
        loop {
            let lp = left[l].pos.to_dvec2();
            let rp = right[r].pos.to_dvec2();
            let next = (l + 1) % left.len();
            let prev = (l + left.len() - 1) % left.len();
            if next != l && ray_side(lp, rp, left[next].pos.to_dvec2()) == side {
                l = next;
                moved = true;
            } else if prev != l && ray_side(lp, rp, left[prev].pos.to_dvec2()) == side {
                l = prev;
                moved = true;
            } else {
                break;
            }
        }

        if !moved {
            return (l, r);
        }
    }
}

fn rightmost(hull: &[Site]) -> usize {
    let mut best = 0;
    for (i, s) in hull.iter().enumerate() {
        let b = hull[best].pos;
        if (s.pos.x, s.pos.y) > (b.x, b.y) {
            best = i;
        }
    }
    best
}

fn leftmost(hull: &[Site]) -> usize {
    let mut best = 0;
    for (i, s) in hull.iter().enumerate() {
        let b = hull[best].pos;
        if (s.pos.x, s.pos.y) < (b.x, b.y) {
            best = i;
        }
    }
    best
}

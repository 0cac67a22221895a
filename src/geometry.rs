//! Geometric predicates for the dividing-chain walk.
//!
//! Everything here runs in IEEE double precision. Near-degenerate
//! configurations are absorbed by scale-aware epsilons rather than exact
//! arithmetic; coincident vertices are detected through [`float2_equals`].

use glam::DVec2;

/// Per-coordinate tolerance for treating two points as the same vertex.
pub const POINT_EPS: f64 = 1e-6;

/// Relative tolerance for treating a cross product as zero.
const CROSS_EPS: f64 = 1e-12;

/// Slack for segment containment tests.
const SEGMENT_EPS: f64 = 1e-6;

/// Rotate `v` 90 degrees counter-clockwise.
#[inline]
pub fn perpendicular(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}

/// True when `a` and `b` agree within [`POINT_EPS`] in both coordinates.
#[inline]
pub fn float2_equals(a: DVec2, b: DVec2) -> bool {
    (a.x - b.x).abs() <= POINT_EPS && (a.y - b.y).abs() <= POINT_EPS
}

/// Intersection of the infinite lines through `ab` and `cd`.
///
/// Parallel and coincident lines yield `None`. The zero test is scaled by
/// the segment lengths so that far-extrapolated endpoints do not distort it.
pub fn line_intersection(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> Option<DVec2> {
    let r = b - a;
    let s = d - c;
    let denom = r.perp_dot(s);
    if denom.abs() <= CROSS_EPS * r.length() * s.length() {
        return None;
    }
    let t = (c - a).perp_dot(s) / denom;
    Some(a + r * t)
}

/// True iff `p` lies on the closed segment `cd`.
///
/// Tested through the axis-aligned bounding box of `cd`; callers only pass
/// points already on the carrying line, so colinearity is not re-checked.
pub fn point_on_segment(c: DVec2, d: DVec2, p: DVec2) -> bool {
    p.x >= c.x.min(d.x) - SEGMENT_EPS
        && p.x <= c.x.max(d.x) + SEGMENT_EPS
        && p.y >= c.y.min(d.y) - SEGMENT_EPS
        && p.y <= c.y.max(d.y) + SEGMENT_EPS
}

/// Sign of the signed area of the triangle `abp`.
///
/// Positive means `p` lies to the left of the directed ray `a -> b`, negative
/// to the right, zero on the carrying line (within a scale-aware tolerance).
pub fn ray_side(a: DVec2, b: DVec2, p: DVec2) -> i32 {
    let d = b - a;
    let w = p - a;
    let cross = d.perp_dot(w);
    let eps = CROSS_EPS * d.length() * w.length();
    if cross > eps {
        1
    } else if cross < -eps {
        -1
    } else {
        0
    }
}

/// Extrapolate an unbounded edge emanating from `origin` to a finite far
/// endpoint.
///
/// The edge is perpendicular to the segment between the two owner sites; the
/// direction is `perpendicular(a - b)` and the extrapolation distance `far`
/// must dominate the site bounding box (see [`far_distance`]). The incoming
/// chain ray uses `(right, left)` argument order, the outgoing ray
/// `(left, right)`; this fixes the vertical sense of each ray.
pub fn far_endpoint(origin: DVec2, a: DVec2, b: DVec2, far: f64) -> DVec2 {
    origin + perpendicular(a - b).normalize() * far
}

/// Extrapolation distance dominating the bounding box of `sites`: four times
/// the largest absolute coordinate. Far endpoints computed with it lie
/// outside the convex hull of the sites by a comfortable margin.
pub fn far_distance(sites: impl Iterator<Item = DVec2>) -> f64 {
    let mut extent = 0.0f64;
    for p in sites {
        extent = extent.max(p.x.abs()).max(p.y.abs());
    }
    extent * 4.0
}

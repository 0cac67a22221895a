#![allow(dead_code)]

//! Brute-force ground truth for small diagrams.
//!
//! Builds a Voronoi diagram directly from the definition: each pairwise
//! bisector is clipped against every other site's dominance half-plane, and
//! the surviving intervals become edges. Quadratic per pair, but exact
//! enough to serve as the reference the merger is compared against.

use glam::DVec2;

use dc_voronoi::{Diagram, Edge, Point, Site};

fn dvec(p: Point) -> DVec2 {
    DVec2::new(p.x, p.y)
}

/// Extrapolation distance used for unbounded edges: four times the largest
/// absolute coordinate (the same policy the merger applies).
pub fn far_of(sites: &[Site]) -> f64 {
    4.0 * sites
        .iter()
        .map(|s| s.pos.x.abs().max(s.pos.y.abs()))
        .fold(0.0, f64::max)
}

/// Build the Voronoi diagram of `sites` by brute force, clipping unbounded
/// edges at `far` along each bisector.
pub fn build_diagram(sites: &[Site], far: f64) -> Diagram {
    let mut edges = Vec::new();
    for i in 0..sites.len() {
        for j in (i + 1)..sites.len() {
            if let Some(e) = bisector_edge(sites, i, j, far) {
                edges.push(e);
            }
        }
    }
    Diagram::new(sites.to_vec(), edges, convex_hull(sites))
}

/// The surviving piece of the bisector between sites `i` and `j`, if any.
fn bisector_edge(sites: &[Site], i: usize, j: usize, far: f64) -> Option<Edge> {
    let a = dvec(sites[i].pos);
    let b = dvec(sites[j].pos);
    let mid = (a + b) * 0.5;
    let ab = b - a;
    let d = DVec2::new(-ab.y, ab.x).normalize();

    // Dominance interval along the bisector: p = mid + t*d stays no farther
    // from `a` than from any third site. Each constraint is linear in t.
    let mut lo = -far;
    let mut hi = far;
    for (k, s) in sites.iter().enumerate() {
        if k == i || k == j {
            continue;
        }
        let c = dvec(s.pos);
        let w = c - a;
        let coef = 2.0 * d.dot(w);
        let rhs = c.length_squared() - a.length_squared() - 2.0 * mid.dot(w);
        if coef.abs() < 1e-12 {
            if rhs < 0.0 {
                return None;
            }
        } else if coef > 0.0 {
            hi = hi.min(rhs / coef);
        } else {
            lo = lo.max(rhs / coef);
        }
    }

    if hi - lo < 1e-9 {
        return None;
    }
    let p0 = mid + d * lo;
    let p1 = mid + d * hi;
    Some(Edge::new(
        Point::new(p0.x, p0.y),
        Point::new(p1.x, p1.y),
        sites[i].id,
        sites[j].id,
    ))
}

/// Andrew's monotone chain convex hull, counter-clockwise.
pub fn convex_hull(sites: &[Site]) -> Vec<Site> {
    if sites.len() <= 2 {
        let mut hull = sites.to_vec();
        hull.sort_by(|a, b| {
            (a.pos.x, a.pos.y)
                .partial_cmp(&(b.pos.x, b.pos.y))
                .expect("site coordinates must be comparable")
        });
        return hull;
    }

    let mut pts = sites.to_vec();
    pts.sort_by(|a, b| {
        (a.pos.x, a.pos.y)
            .partial_cmp(&(b.pos.x, b.pos.y))
            .expect("site coordinates must be comparable")
    });

    let cross = |o: &Site, p: &Site, q: &Site| -> f64 {
        let op = dvec(p.pos) - dvec(o.pos);
        let oq = dvec(q.pos) - dvec(o.pos);
        op.perp_dot(oq)
    };

    let mut lower: Vec<Site> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Site> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Unordered owner pairs of every edge in a diagram.
pub fn owner_pairs(d: &Diagram) -> Vec<(u32, u32)> {
    let mut pairs: Vec<(u32, u32)> = d
        .edges
        .iter()
        .map(|e| (e.left.min(e.right), e.left.max(e.right)))
        .collect();
    pairs.sort_unstable();
    pairs
}

/// Endpoints shared by at least two edges: the true Voronoi vertices of the
/// diagram (far extrapolations appear in a single edge only).
pub fn shared_vertices(d: &Diagram) -> Vec<DVec2> {
    let endpoints: Vec<DVec2> = d
        .edges
        .iter()
        .flat_map(|e| [dvec(e.start), dvec(e.end)])
        .collect();
    let close = |a: DVec2, b: DVec2| (a.x - b.x).abs() <= 1e-6 && (a.y - b.y).abs() <= 1e-6;

    let mut vertices: Vec<DVec2> = Vec::new();
    for (i, &p) in endpoints.iter().enumerate() {
        let shared = endpoints
            .iter()
            .enumerate()
            .any(|(j, &q)| i != j && close(p, q));
        if shared && !vertices.iter().any(|&v| close(p, v)) {
            vertices.push(p);
        }
    }
    vertices
}

/// Assert that every point of every edge is equidistant from its owners and
/// no other site is closer: the defining property of a Voronoi edge.
pub fn assert_voronoi_property(d: &Diagram) {
    for (i, e) in d.edges.iter().enumerate() {
        let l = d.site(e.left).expect("left owner").pos;
        let r = d.site(e.right).expect("right owner").pos;
        let (s, t) = (dvec(e.start), dvec(e.end));
        for frac in [0.1, 0.3, 0.5, 0.7, 0.9] {
            let p = s + (t - s) * frac;
            let dl = p.distance(dvec(l));
            let dr = p.distance(dvec(r));
            let tol = 1e-6 * (1.0 + dl);
            assert!(
                (dl - dr).abs() <= tol,
                "edge {} not on bisector of its owners at t={}: dl={}, dr={}",
                i,
                frac,
                dl,
                dr
            );
            for other in &d.sites {
                if other.id == e.left || other.id == e.right {
                    continue;
                }
                let ds = p.distance(dvec(other.pos));
                assert!(
                    dl <= ds + tol,
                    "edge {} invaded by site {} at t={}: owner dist {}, other dist {}",
                    i,
                    other.id,
                    frac,
                    dl,
                    ds
                );
            }
        }
    }
}

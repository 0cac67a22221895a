//! Consistency validation for planar Voronoi diagrams.
//!
//! Verifies the structural invariants a diagram must satisfy (owner ids,
//! region cross-references, finite endpoints, hull orientation) plus a
//! geometric spot check that every edge lies on its owners' bisector.
//! Useful for debugging, testing, and catching numerical issues.

use crate::geometry::ray_side;
use crate::Diagram;

/// Detailed validation report for a planar Voronoi diagram.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Number of sites in the diagram.
    pub num_sites: usize,
    /// Number of edges in the diagram.
    pub num_edges: usize,

    /// Edges with an owner id that is not a site of the diagram.
    pub unknown_owner_edges: usize,
    /// Edges whose two owners are the same site.
    pub self_owner_edges: usize,
    /// Edges not referenced by exactly their two owners' regions.
    pub region_mismatches: usize,
    /// Region references beyond the expected two per edge.
    pub stray_region_refs: usize,
    /// Edge endpoints that are NaN or infinite.
    pub nonfinite_endpoints: usize,

    /// True when the hull polygon is not counter-clockwise.
    pub hull_not_ccw: bool,
    /// Sites lying strictly outside the hull polygon.
    pub sites_outside_hull: usize,

    /// Largest relative deviation of an edge midpoint from equidistance
    /// between its two owners.
    pub max_bisector_error: f64,
}

impl ValidationReport {
    /// Check that the diagram satisfies all structural invariants and that
    /// every edge midpoint is equidistant from its owners within `1e-6`.
    pub fn is_valid(&self) -> bool {
        self.unknown_owner_edges == 0
            && self.self_owner_edges == 0
            && self.region_mismatches == 0
            && self.stray_region_refs == 0
            && self.nonfinite_endpoints == 0
            && !self.hull_not_ccw
            && self.sites_outside_hull == 0
            && self.max_bisector_error <= 1e-6
    }

    /// Format a summary of any issues found.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return "Valid".to_string();
        }

        let mut issues = Vec::new();
        if self.unknown_owner_edges > 0 {
            issues.push(format!("{} edges with unknown owners", self.unknown_owner_edges));
        }
        if self.self_owner_edges > 0 {
            issues.push(format!("{} edges owned by a single site", self.self_owner_edges));
        }
        if self.region_mismatches > 0 {
            issues.push(format!("{} region mismatches", self.region_mismatches));
        }
        if self.stray_region_refs > 0 {
            issues.push(format!("{} stray region references", self.stray_region_refs));
        }
        if self.nonfinite_endpoints > 0 {
            issues.push(format!("{} non-finite endpoints", self.nonfinite_endpoints));
        }
        if self.hull_not_ccw {
            issues.push("hull not counter-clockwise".to_string());
        }
        if self.sites_outside_hull > 0 {
            issues.push(format!("{} sites outside hull", self.sites_outside_hull));
        }
        if self.max_bisector_error > 1e-6 {
            issues.push(format!("bisector error {:.3e}", self.max_bisector_error));
        }
        issues.join(", ")
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ValidationReport {{ sites={}, edges={}, {} }}",
            self.num_sites,
            self.num_edges,
            self.summary()
        )
    }
}

/// Validate the structural and geometric consistency of a diagram.
pub fn validate(diagram: &Diagram) -> ValidationReport {
    let num_sites = diagram.num_sites();
    let num_edges = diagram.num_edges();

    let mut unknown_owner_edges = 0;
    let mut self_owner_edges = 0;
    let mut region_mismatches = 0;
    let mut nonfinite_endpoints = 0;
    let mut max_bisector_error = 0.0f64;

    for (i, e) in diagram.edges.iter().enumerate() {
        let left = diagram.site(e.left);
        let right = diagram.site(e.right);
        if left.is_none() || right.is_none() {
            unknown_owner_edges += 1;
        }
        if e.left == e.right {
            self_owner_edges += 1;
        }
        if !diagram.region(e.left).contains(&i) || !diagram.region(e.right).contains(&i) {
            region_mismatches += 1;
        }
        if !e.start.is_finite() {
            nonfinite_endpoints += 1;
        }
        if !e.end.is_finite() {
            nonfinite_endpoints += 1;
        }

        if let (Some(l), Some(r)) = (left, right) {
            let m = (e.start.to_dvec2() + e.end.to_dvec2()) * 0.5;
            let da = m.distance(l.pos.to_dvec2());
            let db = m.distance(r.pos.to_dvec2());
            let err = (da - db).abs() / (1.0 + da.max(db));
            max_bisector_error = max_bisector_error.max(err);
        }
    }

    // Every edge is referenced from exactly two regions.
    let total_refs: usize = diagram.regions.values().map(Vec::len).sum();
    let stray_region_refs = total_refs.saturating_sub(2 * num_edges);

    // Hull orientation via the shoelace sum; degenerate hulls pass.
    let hull = &diagram.hull;
    let mut area2 = 0.0;
    for i in 0..hull.len() {
        let a = hull[i].pos;
        let b = hull[(i + 1) % hull.len()].pos;
        area2 += a.x * b.y - b.x * a.y;
    }
    let hull_not_ccw = hull.len() >= 3 && area2 <= 0.0;

    let mut sites_outside_hull = 0;
    if hull.len() >= 3 {
        for s in &diagram.sites {
            let p = s.pos.to_dvec2();
            let outside = (0..hull.len()).any(|i| {
                let a = hull[i].pos.to_dvec2();
                let b = hull[(i + 1) % hull.len()].pos.to_dvec2();
                ray_side(a, b, p) == -1
            });
            if outside {
                sites_outside_hull += 1;
            }
        }
    }

    ValidationReport {
        num_sites,
        num_edges,
        unknown_owner_edges,
        self_owner_edges,
        region_mismatches,
        stray_region_refs,
        nonfinite_endpoints,
        hull_not_ccw,
        sites_outside_hull,
        max_bisector_error,
    }
}

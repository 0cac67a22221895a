//! The dividing-chain merger.
//!
//! Given two diagrams over horizontally separated site sets, the merger
//! walks the contiguous chain of new Voronoi edges separating them: an
//! incoming ray from above the site set, a descent through the regions of
//! both inputs that cuts every edge the chain crosses, and an outgoing ray
//! below. Edges stranded on the losing side of the chain are pruned, and
//! the surviving edges of both halves are reassembled with the chain into
//! the merged diagram.
//!
//! The walk is single-threaded and purely computational; all scratch state
//! lives for one invocation.

mod crossing;

use std::sync::OnceLock;

use glam::DVec2;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::diagram::Diagram;
use crate::error::MergeError;
use crate::geometry::{far_distance, far_endpoint, float2_equals, perpendicular, ray_side};
use crate::hull::merge_hulls;
use crate::types::{Edge, Point, Site, SiteId};
use crossing::{ray_region_crossing, region_crossing};

fn log_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var("DCV_LOG")
            .ok()
            .map_or(false, |v| v == "1" || v.eq_ignore_ascii_case("true"))
    })
}

/// Which input diagram a walk event happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Walk state over one input diagram.
///
/// The chain is always inside exactly one region per side; `current` names
/// that region's site and the enter fields record where the chain came in.
struct HalfState {
    side: Side,
    sites: Vec<Site>,
    edges: Vec<Edge>,
    regions: FxHashMap<SiteId, Vec<usize>>,
    site_index: FxHashMap<SiteId, usize>,
    current: Site,
    enter_point: DVec2,
    /// Edge through which the chain entered, `None` for the incoming ray.
    enter_edge: Option<usize>,
    /// Edge indices stranded on the losing side.
    removed: FxHashSet<usize>,
}

impl HalfState {
    fn new(side: Side, diagram: Diagram, current: Site) -> Self {
        Self {
            side,
            sites: diagram.sites,
            edges: diagram.edges,
            regions: diagram.regions,
            site_index: diagram.site_index,
            current,
            enter_point: DVec2::ZERO,
            enter_edge: None,
            removed: FxHashSet::default(),
        }
    }

    /// Edge indices of the region the chain currently traverses.
    fn region_slice(&self) -> &[usize] {
        self.regions.get(&self.current.id).map_or(&[], Vec::as_slice)
    }

    /// Leave the current region through `exit_edge` at `exit_point`: replace
    /// the crossed edge with its cut version, prune edges of the region that
    /// are stranded on the losing side of the chord, and step across the cut
    /// edge into the neighboring region.
    ///
    /// Fails when the cut edge's far owner is not a site of this diagram.
    fn handle_exit(&mut self, exit_point: DVec2, exit_edge: usize) -> Result<(), MergeError> {
        let enter = self.enter_point;
        let enter_edge = self.enter_edge;

        let e = self.edges[exit_edge];
        let cut = if enter_edge == Some(exit_edge) {
            // The chain entered and left through the same edge; only the
            // sliver between the two crossings survives.
            Edge::new(
                Point::from_dvec2(enter),
                Point::from_dvec2(exit_point),
                e.left,
                e.right,
            )
        } else {
            let side_start = ray_side(enter, exit_point, e.start.to_dvec2());
            let side_end = ray_side(enter, exit_point, e.end.to_dvec2());
            let keep_start = match self.side {
                Side::Left => side_start <= side_end,
                Side::Right => side_start >= side_end,
            };
            let kept = if keep_start { e.start } else { e.end };
            Edge::new(kept, Point::from_dvec2(exit_point), e.left, e.right)
        };
        self.edges[exit_edge] = cut;

        // Prune region edges with an endpoint strictly on the losing side of
        // the chord. Collinear endpoints count as on the chain and are kept.
        let region: &[usize] = self.regions.get(&self.current.id).map_or(&[], Vec::as_slice);
        for &ei in region {
            if ei == exit_edge || Some(ei) == enter_edge {
                continue;
            }
            let s1 = ray_side(enter, exit_point, self.edges[ei].start.to_dvec2());
            let s2 = ray_side(enter, exit_point, self.edges[ei].end.to_dvec2());
            let losing = match self.side {
                Side::Left => s1.max(s2) > 0,
                Side::Right => s1.min(s2) < 0,
            };
            if losing {
                self.removed.insert(ei);
            }
        }

        let next_id = cut.neighbor(self.current.id);
        let next_pos = self
            .site_index
            .get(&next_id)
            .copied()
            .ok_or(MergeError::UnknownSite(next_id))?;
        self.current = self.sites[next_pos];
        self.enter_point = exit_point;
        self.enter_edge = Some(exit_edge);
        Ok(())
    }
}

/// Travel direction of the chain between the current pair: the bisector
/// descends along the perpendicular of `l - r`. Re-derived from the current
/// pair at every step, never cached.
#[inline]
fn travel(l: Site, r: Site) -> DVec2 {
    perpendicular(l.pos.to_dvec2() - r.pos.to_dvec2())
}

#[inline]
fn no_crossing(l: Site, r: Site) -> MergeError {
    MergeError::NoCrossing {
        left_site: l.id,
        right_site: r.id,
    }
}

/// Merge two diagrams over horizontally separated site sets.
///
/// Every site of `left` must lie on or left of every site of `right`, both
/// hulls must be counter-clockwise, and both inputs must satisfy the diagram
/// invariants, with their edges extrapolated at least as far as the union's
/// far distance. Both inputs are consumed; on success their buffers move
/// into the output.
pub fn merge(left: Diagram, right: Diagram) -> Result<Diagram, MergeError> {
    if left.sites.is_empty() || right.sites.is_empty() {
        return Err(MergeError::EmptySide);
    }

    let far = far_distance(
        left.sites
            .iter()
            .chain(right.sites.iter())
            .map(|s| s.pos.to_dvec2()),
    );

    let hulls = merge_hulls(&left.hull, &right.hull);
    let (l0, r0) = hulls.upper;
    let (ql, qr) = hulls.lower;

    let mut lh = HalfState::new(Side::Left, left, l0);
    let mut rh = HalfState::new(Side::Right, right, r0);
    let mut chain: Vec<Edge> = Vec::new();

    // Incoming ray: descend the tangent bisector from above the hull and
    // find where it first penetrates either region.
    let mid = (l0.pos.to_dvec2() + r0.pos.to_dvec2()) * 0.5;
    let dir = travel(l0, r0);
    let lc = ray_region_crossing(mid, dir, lh.region_slice(), &lh.edges);
    let rc = ray_region_crossing(mid, dir, rh.region_slice(), &rh.edges);

    let mut current;
    let mut excl_l = None;
    let mut excl_r = None;
    match (lc, rc) {
        (None, None) => {
            // The tangent bisector crosses nothing: the whole chain is one
            // edge spanning the plane, and the tangent pairs must agree.
            if (l0.id, r0.id) != (ql.id, qr.id) {
                return Err(no_crossing(l0, r0));
            }
            let top = far_endpoint(mid, r0.pos.to_dvec2(), l0.pos.to_dvec2(), far);
            let bottom = far_endpoint(mid, l0.pos.to_dvec2(), r0.pos.to_dvec2(), far);
            chain.push(Edge::new(
                Point::from_dvec2(top),
                Point::from_dvec2(bottom),
                l0.id,
                r0.id,
            ));
            return Ok(assemble(lh, rh, chain, hulls.hull));
        }
        (lc, rc) => {
            let first = match (lc, rc) {
                (Some(a), Some(b)) if float2_equals(a.point, b.point) => None,
                (Some(a), Some(b)) => Some(if a.along <= b.along {
                    (Side::Left, a)
                } else {
                    (Side::Right, b)
                }),
                (Some(a), None) => Some((Side::Left, a)),
                (None, Some(b)) => Some((Side::Right, b)),
                (None, None) => unreachable!(),
            };

            // First chain vertex and the upward ray back out of the hull.
            let entry = match first {
                Some((_, c)) => c.point,
                None => lc.expect("both crossings present").point,
            };
            let top = far_endpoint(entry, r0.pos.to_dvec2(), l0.pos.to_dvec2(), far);
            chain.push(Edge::new(
                Point::from_dvec2(entry),
                Point::from_dvec2(top),
                l0.id,
                r0.id,
            ));
            lh.enter_point = top;
            rh.enter_point = top;

            match first {
                Some((Side::Left, c)) => {
                    lh.handle_exit(c.point, c.edge)?;
                    excl_l = Some(c.edge);
                }
                Some((Side::Right, c)) => {
                    rh.handle_exit(c.point, c.edge)?;
                    excl_r = Some(c.edge);
                }
                None => {
                    // The incoming ray ends on a triple point: both regions
                    // are cut and advanced simultaneously, sharing one exit
                    // vertex.
                    let (a, b) = (lc.expect("left crossing"), rc.expect("right crossing"));
                    lh.handle_exit(a.point, a.edge)?;
                    rh.handle_exit(a.point, b.edge)?;
                    excl_l = Some(a.edge);
                    excl_r = Some(b.edge);
                }
            }
            current = entry;
        }
    }

    if log_enabled() {
        eprintln!(
            "merge: chain enters at ({:.6}, {:.6})",
            current.x, current.y
        );
    }

    // Chain walk: descend region by region until the lower tangent pair is
    // reached. Each step crosses the nearest forward edge of either region.
    while (lh.current.id, rh.current.id) != (ql.id, qr.id) {
        let dir = travel(lh.current, rh.current);
        let lc = region_crossing(current, dir, lh.region_slice(), &lh.edges, excl_l);
        let rc = region_crossing(current, dir, rh.region_slice(), &rh.edges, excl_r);

        match (lc, rc) {
            (None, None) => return Err(no_crossing(lh.current, rh.current)),
            (Some(a), Some(b)) if float2_equals(a.point, b.point) => {
                // Triple point: both regions exit through the same vertex.
                chain.push(Edge::new(
                    Point::from_dvec2(current),
                    Point::from_dvec2(a.point),
                    lh.current.id,
                    rh.current.id,
                ));
                lh.handle_exit(a.point, a.edge)?;
                rh.handle_exit(a.point, b.edge)?;
                excl_l = Some(a.edge);
                excl_r = Some(b.edge);
                current = a.point;
            }
            (lc, rc) => {
                let left_wins = match (&lc, &rc) {
                    (Some(a), Some(b)) => a.approach <= b.approach,
                    (Some(_), None) => true,
                    _ => false,
                };
                if left_wins {
                    let c = lc.expect("left crossing");
                    chain.push(Edge::new(
                        Point::from_dvec2(current),
                        Point::from_dvec2(c.point),
                        lh.current.id,
                        rh.current.id,
                    ));
                    lh.handle_exit(c.point, c.edge)?;
                    excl_l = Some(c.edge);
                    excl_r = None;
                    current = c.point;
                } else {
                    let c = rc.expect("right crossing");
                    chain.push(Edge::new(
                        Point::from_dvec2(current),
                        Point::from_dvec2(c.point),
                        lh.current.id,
                        rh.current.id,
                    ));
                    rh.handle_exit(c.point, c.edge)?;
                    excl_r = Some(c.edge);
                    excl_l = None;
                    current = c.point;
                }
            }
        }
    }

    // Outgoing ray: the lower tangent bisector leaves both final regions
    // without further crossings.
    let mid = (lh.current.pos.to_dvec2() + rh.current.pos.to_dvec2()) * 0.5;
    let bottom = far_endpoint(
        mid,
        lh.current.pos.to_dvec2(),
        rh.current.pos.to_dvec2(),
        far,
    );
    chain.push(Edge::new(
        Point::from_dvec2(current),
        Point::from_dvec2(bottom),
        lh.current.id,
        rh.current.id,
    ));

    if log_enabled() {
        eprintln!(
            "merge: {} chain edges, pruned {} left / {} right",
            chain.len(),
            lh.removed.len(),
            rh.removed.len()
        );
    }

    Ok(assemble(lh, rh, chain, hulls.hull))
}

/// Compact both halves by descending-index swap-remove, then concatenate
/// left edges, chain edges and right edges into the output diagram.
fn assemble(lh: HalfState, rh: HalfState, chain: Vec<Edge>, hull: Vec<Site>) -> Diagram {
    let mut edges = compact(lh.edges, lh.removed);
    let right_edges = compact(rh.edges, rh.removed);
    edges.reserve(chain.len() + right_edges.len());
    edges.extend(chain);
    edges.extend(right_edges);

    let mut sites = lh.sites;
    sites.extend(rh.sites);

    Diagram::new(sites, edges, hull)
}

fn compact(mut edges: Vec<Edge>, removed: FxHashSet<usize>) -> Vec<Edge> {
    let mut indices: Vec<usize> = removed.into_iter().collect();
    indices.sort_unstable_by(|a, b| b.cmp(a));
    for i in indices {
        edges.swap_remove(i);
    }
    edges
}

//! Ray/region crossing queries used by the chain walk.

use glam::DVec2;

use crate::geometry::{line_intersection, point_on_segment};
use crate::types::Edge;

/// A crossing of the travel line with a region boundary, ordered by the
/// rotated-frame coordinate along the travel direction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RayCrossing {
    pub along: f64,
    pub point: DVec2,
    pub edge: usize,
}

/// A strictly-forward crossing, ordered by squared distance from the origin.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ForwardCrossing {
    pub approach: f64,
    pub point: DVec2,
    pub edge: usize,
}

/// Among the edges bordering a region, find the one the line through
/// `origin` along `dir` crosses earliest in travel order.
///
/// "Earliest" is the smallest coordinate in the rotated frame where `dir`
/// maps to the positive axis; it may be negative (behind `origin`). Returns
/// `None` when no region edge is crossed.
pub(crate) fn ray_region_crossing(
    origin: DVec2,
    dir: DVec2,
    region: &[usize],
    edges: &[Edge],
) -> Option<RayCrossing> {
    let dirn = dir.normalize();
    let mut best: Option<RayCrossing> = None;
    for &ei in region {
        let e = &edges[ei];
        let (s, t) = (e.start.to_dvec2(), e.end.to_dvec2());
        let Some(p) = line_intersection(origin, origin + dir, s, t) else {
            continue;
        };
        if !point_on_segment(s, t, p) {
            continue;
        }
        let along = dirn.dot(p - origin);
        if best.as_ref().map_or(true, |b| along < b.along) {
            best = Some(RayCrossing {
                along,
                point: p,
                edge: ei,
            });
        }
    }
    best
}

/// Among the edges bordering a region other than `excluded`, find the one
/// the ray from `origin` along `dir` crosses closest ahead of `origin`.
///
/// Only strictly forward hits count. Returns `None` when nothing is crossed.
pub(crate) fn region_crossing(
    origin: DVec2,
    dir: DVec2,
    region: &[usize],
    edges: &[Edge],
    excluded: Option<usize>,
) -> Option<ForwardCrossing> {
    let mut best: Option<ForwardCrossing> = None;
    for &ei in region {
        if Some(ei) == excluded {
            continue;
        }
        let e = &edges[ei];
        let (s, t) = (e.start.to_dvec2(), e.end.to_dvec2());
        let Some(p) = line_intersection(origin, origin + dir, s, t) else {
            continue;
        };
        if !point_on_segment(s, t, p) {
            continue;
        }
        if dir.dot(p - origin) <= 0.0 {
            continue;
        }
        let approach = (p - origin).length_squared();
        if best.as_ref().map_or(true, |b| approach < b.approach) {
            best = Some(ForwardCrossing {
                approach,
                point: p,
                edge: ei,
            });
        }
    }
    best
}

//! Planar Voronoi diagram storage and access.

use rustc_hash::FxHashMap;

use crate::types::{Edge, Site, SiteId};

/// A planar Voronoi diagram over a set of sites.
///
/// The diagram bundles:
/// - the ordered site sequence,
/// - the ordered edge sequence (all edges bounded; unbounded ones carry a
///   far-extrapolated endpoint),
/// - a region multimap from site id to the indices of the edges bordering
///   that site (every edge appears in exactly its two owners' regions),
/// - an id-to-index map over the site sequence,
/// - the convex hull of the sites, counter-clockwise.
///
/// Diagrams come from a per-half builder or from a successful
/// [`merge`](crate::merge); merging consumes its inputs.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub sites: Vec<Site>,
    pub edges: Vec<Edge>,
    pub hull: Vec<Site>,
    pub(crate) regions: FxHashMap<SiteId, Vec<usize>>,
    pub(crate) site_index: FxHashMap<SiteId, usize>,
}

impl Diagram {
    /// Build a diagram from sites, edges and a counter-clockwise hull.
    ///
    /// The region multimap and the id-to-index map are derived from the
    /// inputs: each edge is registered under both of its owner ids.
    pub fn new(sites: Vec<Site>, edges: Vec<Edge>, hull: Vec<Site>) -> Self {
        let mut site_index = FxHashMap::default();
        let mut regions: FxHashMap<SiteId, Vec<usize>> = FxHashMap::default();
        for (i, s) in sites.iter().enumerate() {
            site_index.insert(s.id, i);
            regions.entry(s.id).or_default();
        }
        for (i, e) in edges.iter().enumerate() {
            regions.entry(e.left).or_default().push(i);
            regions.entry(e.right).or_default().push(i);
        }
        Self {
            sites,
            edges,
            hull,
            regions,
            site_index,
        }
    }

    /// Diagram of a single site: no edges, the hull is the site itself.
    pub fn single(site: Site) -> Self {
        Self::new(vec![site], Vec::new(), vec![site])
    }

    #[inline]
    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Indices of the edges bordering `site`. Empty for unknown ids.
    #[inline]
    pub fn region(&self, site: SiteId) -> &[usize] {
        self.regions.get(&site).map_or(&[], Vec::as_slice)
    }

    /// Position of `site` in the site sequence.
    #[inline]
    pub fn site_position(&self, site: SiteId) -> Option<usize> {
        self.site_index.get(&site).copied()
    }

    /// Look up a site by id.
    #[inline]
    pub fn site(&self, site: SiteId) -> Option<&Site> {
        self.site_position(site).map(|i| &self.sites[i])
    }
}

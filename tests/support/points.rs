#![allow(dead_code)]

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dc_voronoi::{Point, Site};

/// Generate `n` random sites in the square `[-extent, extent]^2`, with ids
/// `0..n`.
pub fn random_sites(n: usize, extent: f64, seed: u64) -> Vec<Site> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let x: f64 = rng.gen_range(-extent..extent);
            let y: f64 = rng.gen_range(-extent..extent);
            Site::new(i as u32, Point::new(x, y))
        })
        .collect()
}

/// Split sites into a left and a right half at the median x coordinate.
/// Ids are preserved; ties on x fall back to y.
pub fn split_by_x(mut sites: Vec<Site>) -> (Vec<Site>, Vec<Site>) {
    sites.sort_by(|a, b| {
        (a.pos.x, a.pos.y)
            .partial_cmp(&(b.pos.x, b.pos.y))
            .expect("site coordinates must be comparable")
    });
    let right = sites.split_off(sites.len() / 2);
    (sites, right)
}

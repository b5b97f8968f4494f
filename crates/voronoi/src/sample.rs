//! Reproducible random site sets.
//!
//! - `random_sites`: uniform real coordinates in `[-h, h)²`.
//! - `random_lattice_sites`: distinct integer points in `[-h, h]²`, the input
//!   shape of the text drivers.
//!
//! Both take an explicit seed and use `StdRng`, so a `(count, extent, seed)`
//! triple always replays the same sites.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::Point;

/// `count` uniform sites in `[-half_extent, half_extent)²`.
pub fn random_sites(count: usize, half_extent: f64, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let h = half_extent.abs().max(f64::MIN_POSITIVE);
    (0..count)
        .map(|_| Point::new(rng.gen_range(-h..h), rng.gen_range(-h..h)))
        .collect()
}

/// Up to `count` distinct integer sites in `[-half_extent, half_extent]²`.
///
/// Returns fewer sites when the lattice has fewer than `count` points.
pub fn random_lattice_sites(count: usize, half_extent: i64, seed: u64) -> Vec<Point> {
    let h = half_extent.saturating_abs();
    let side = 2 * h as u128 + 1;
    let capacity = usize::try_from(side * side).unwrap_or(usize::MAX);
    let target = count.min(capacity);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(target);
    let mut sites = Vec::with_capacity(target);
    while sites.len() < target {
        let (x, y) = (rng.gen_range(-h..=h), rng.gen_range(-h..=h));
        if seen.insert((x, y)) {
            sites.push(Point::new(x as f64, y as f64));
        }
    }
    sites
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sites() {
        assert_eq!(random_sites(20, 5.0, 11), random_sites(20, 5.0, 11));
        assert_ne!(random_sites(20, 5.0, 11), random_sites(20, 5.0, 12));
        let sites = random_sites(100, 5.0, 1);
        assert!(sites.iter().all(|p| p.x.abs() <= 5.0 && p.y.abs() <= 5.0));
    }

    #[test]
    fn lattice_sites_are_distinct_and_capped() {
        let sites = random_lattice_sites(50, 1, 3);
        assert_eq!(sites.len(), 9);
        let distinct: HashSet<(i64, i64)> = sites
            .iter()
            .map(|p| (p.x as i64, p.y as i64))
            .collect();
        assert_eq!(distinct.len(), 9);
        let sites = random_lattice_sites(30, 100, 3);
        assert_eq!(sites.len(), 30);
        let on_lattice = |p: &Point| p.x.fract() == 0.0 && p.y.fract() == 0.0;
        assert!(sites.iter().all(on_lattice));
        let in_box = |p: &Point| p.x.abs() <= 100.0 && p.y.abs() <= 100.0;
        assert!(sites.iter().all(in_box));
    }
}

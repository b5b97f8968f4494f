//! Vertex welding on a uniform grid.
//!
//! Co-circular sites make several circle events report the same Voronoi vertex
//! with slightly different rounding. `VertexIndex` hands out one id per cluster
//! of points closer than `tol`, so the polygon walk sees a single vertex.

use std::collections::HashMap;

use crate::geom::Point;

#[derive(Clone, Debug)]
pub struct VertexIndex {
    points: Vec<Point>,
    grid: HashMap<(i64, i64), Vec<usize>>,
    cell: f64,
    tol: f64,
}

impl VertexIndex {
    pub fn new(tol: f64) -> Self {
        let tol = tol.max(0.0);
        Self {
            points: Vec::new(),
            grid: HashMap::new(),
            cell: tol.max(f64::MIN_POSITIVE),
            tol,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, id: usize) -> Point {
        self.points[id]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    fn key(&self, p: Point) -> (i64, i64) {
        let kx = (p.x / self.cell).floor() as i64;
        let ky = (p.y / self.cell).floor() as i64;
        (kx, ky)
    }

    /// Id of a stored point within `tol` of `p`, if any.
    pub fn find(&self, p: Point) -> Option<usize> {
        let (kx, ky) = self.key(p);
        let mut best: Option<(usize, f64)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let key = (kx.saturating_add(dx), ky.saturating_add(dy));
                let Some(bucket) = self.grid.get(&key) else {
                    continue;
                };
                for &id in bucket {
                    let d = nalgebra::distance(&self.points[id], &p);
                    if d <= self.tol && best.map_or(true, |(_, bd)| d < bd) {
                        best = Some((id, d));
                    }
                }
            }
        }
        best.map(|(id, _)| id)
    }

    /// Store `p` as a new vertex without welding.
    pub fn push(&mut self, p: Point) -> usize {
        let id = self.points.len();
        self.points.push(p);
        let key = self.key(p);
        self.grid.entry(key).or_default().push(id);
        id
    }

    /// Weld `p` into an existing vertex or store it as a new one.
    pub fn insert(&mut self, p: Point) -> usize {
        match self.find(p) {
            Some(id) => id,
            None => self.push(p),
        }
    }
}

//! Half-edge arena.
//!
//! Twins are allocated together at indices `2k` and `2k + 1`, so `twin(e) = e ^ 1`.
//! A half-edge covers the ray that starts at its `origin` and runs along `dir`;
//! while `origin` is unset that end is still open (it extends to infinity unless
//! a later circle event fixes it).

use crate::geom::{bisector_direction, Point, Site, SiteId, Vector};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl EdgeId {
    #[inline]
    pub fn twin(self) -> EdgeId {
        EdgeId(self.0 ^ 1)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HalfEdge {
    /// Point where the edge was born; shared by both twins.
    pub start: Point,
    /// Travel direction of the breakpoint that traces this half-edge.
    pub dir: Vector,
    /// Fixed Voronoi vertex this half-edge emanates from.
    pub origin: Option<Point>,
    /// Site whose cell lies to the left of `dir`.
    pub left_site: Option<SiteId>,
}

#[derive(Clone, Debug, Default)]
pub struct HalfEdges {
    edges: Vec<HalfEdge>,
}

impl HalfEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of half-edges (twice the number of edges).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn get(&self, id: EdgeId) -> &HalfEdge {
        &self.edges[id.0]
    }

    /// Allocate a twin pair born at `start`; returns `(edge, twin)`.
    pub fn new_edge(&mut self, start: Point) -> (EdgeId, EdgeId) {
        let id = EdgeId(self.edges.len());
        let blank = HalfEdge {
            start,
            dir: Vector::zeros(),
            origin: None,
            left_site: None,
        };
        self.edges.push(blank.clone());
        self.edges.push(blank);
        (id, id.twin())
    }

    /// Orient `edge` as the trace of breakpoint `(left, right)` and its twin oppositely.
    ///
    /// `right`'s cell lies on the left of `edge`, `left`'s cell on the left of the twin.
    pub fn assign_site_vector(&mut self, edge: EdgeId, left: Site, right: Site) {
        let dir = bisector_direction(left.at, right.at);
        let e = &mut self.edges[edge.0];
        e.dir = dir;
        e.left_site = Some(right.id);
        let t = &mut self.edges[edge.twin().0];
        t.dir = -dir;
        t.left_site = Some(left.id);
    }

    /// Orient an edge born at a Voronoi vertex; the vertex becomes its fixed origin.
    pub fn assign_circle_vector(&mut self, edge: EdgeId, left: Site, right: Site) {
        self.assign_site_vector(edge, left, right);
        let e = &mut self.edges[edge.0];
        e.origin = Some(e.start);
    }

    /// The breakpoint tracing `edge` reached `vertex`: cap that end.
    pub fn terminate(&mut self, edge: EdgeId, vertex: Point) {
        self.edges[edge.twin().0].origin = Some(vertex);
    }

    /// Each twin pair once, as `(even, odd)` ids.
    pub fn pairs(&self) -> impl Iterator<Item = (EdgeId, EdgeId)> + '_ {
        (0..self.edges.len() / 2).map(|k| (EdgeId(2 * k), EdgeId(2 * k + 1)))
    }
}

//! Finisher: turn the sweep's half-edges into one closed polygon per site.
//!
//! Steps
//! 1. `prune_edges`: clip every twin pair to the box (line, ray, or segment).
//! 2. Weld endpoints (`VertexIndex`), corners first so they keep ids `0..4`.
//! 3. `boundary_points`: order endpoints on the box sides counter-clockwise,
//!    interleaved with the corners.
//! 4. `edge_map` + `construct_polygons`: internal edges in both directions,
//!    boundary edges counter-clockwise only; walk faces taking the most-left turn.
//! 5. `assign_polygons`: each polygon goes to the first unassigned site inside it.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};

use crate::diagram::{Cell, Segment};
use crate::geom::{point_in_polygon, Bounds, GeomCfg, Point, SiteId, Vector};

use super::half_edge::HalfEdges;
use super::weld::VertexIndex;

/// Ids `0..4` of a finisher's `VertexIndex` are the box corners BL, BR, TR, TL.
pub const CORNERS: usize = 4;

/// Liang–Barsky clip of `origin + t·dir`, `t ∈ [t0, t1]`, against `bounds`.
pub fn clip_to_bounds(
    origin: Point,
    dir: Vector,
    mut t0: f64,
    mut t1: f64,
    bounds: &Bounds,
    tol: f64,
) -> Option<(Point, Point)> {
    let checks = [
        (-dir.x, origin.x - bounds.left),
        (dir.x, bounds.right - origin.x),
        (-dir.y, origin.y - bounds.bottom),
        (dir.y, bounds.top - origin.y),
    ];
    for (step, room) in checks {
        if step == 0.0 {
            if room < -tol {
                return None;
            }
            continue;
        }
        let r = room / step;
        if step < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    if !t0.is_finite() || !t1.is_finite() {
        return None;
    }
    Some((origin + dir * t0, origin + dir * t1))
}

/// Clip all twin pairs to the box; pairs that miss it or shrink below `tol` are dropped.
///
/// Each returned segment has `sites.0` on the left of `a → b`.
pub fn prune_edges(edges: &HalfEdges, bounds: &Bounds, tol: f64) -> Vec<Segment> {
    let mut kept = Vec::new();
    for (id, twin) in edges.pairs() {
        let (e, t) = (edges.get(id), edges.get(twin));
        let (Some(e_left), Some(t_left)) = (e.left_site, t.left_site) else {
            continue;
        };
        let (lo, hi) = (f64::NEG_INFINITY, f64::INFINITY);
        // (anchor, direction, parameter range, site on the left of the direction, other site)
        let (anchor, dir, t0, t1, left, right) = match (e.origin, t.origin) {
            (Some(a), Some(b)) => (a, b - a, 0.0, 1.0, e_left, t_left),
            (Some(a), None) => (a, e.dir, 0.0, hi, e_left, t_left),
            (None, Some(b)) => (b, t.dir, 0.0, hi, t_left, e_left),
            (None, None) => (e.start, e.dir, lo, hi, e_left, t_left),
        };
        if dir == Vector::zeros() {
            continue;
        }
        let Some((a, b)) = clip_to_bounds(anchor, dir, t0, t1, bounds, tol) else {
            continue;
        };
        let (a, b) = (bounds.snap(a, tol), bounds.snap(b, tol));
        if nalgebra::distance(&a, &b) <= tol {
            continue;
        }
        kept.push(Segment {
            a,
            b,
            sites: (left, right),
        });
    }
    kept
}

/// Vertex ids on the box boundary, in counter-clockwise order starting at the
/// bottom-left corner; corners are always included.
pub fn boundary_points(
    vertices: &VertexIndex,
    candidates: impl IntoIterator<Item = usize>,
    bounds: &Bounds,
    tol: f64,
) -> Vec<usize> {
    let mut sides: [Vec<usize>; 4] = Default::default();
    let ids: BTreeSet<usize> = candidates
        .into_iter()
        .filter(|&id| id >= CORNERS)
        .collect();
    for id in ids {
        let p = vertices.point(id);
        let side = if (p.y - bounds.bottom).abs() <= tol {
            0
        } else if (p.x - bounds.right).abs() <= tol {
            1
        } else if (p.y - bounds.top).abs() <= tol {
            2
        } else if (p.x - bounds.left).abs() <= tol {
            3
        } else {
            continue;
        };
        sides[side].push(id);
    }
    let x = |id: &usize| vertices.point(*id).x;
    let y = |id: &usize| vertices.point(*id).y;
    sides[0].sort_by(|a, b| x(a).total_cmp(&x(b)));
    sides[1].sort_by(|a, b| y(a).total_cmp(&y(b)));
    sides[2].sort_by(|a, b| x(b).total_cmp(&x(a)));
    sides[3].sort_by(|a, b| y(b).total_cmp(&y(a)));

    let mut cycle = Vec::with_capacity(CORNERS + sides.iter().map(Vec::len).sum::<usize>());
    for (corner, side) in sides.into_iter().enumerate() {
        cycle.push(corner);
        cycle.extend(side);
    }
    cycle
}

/// Directed adjacency: internal edges both ways, boundary edges counter-clockwise only.
pub fn edge_map(
    vertex_count: usize,
    internal: &[(usize, usize)],
    boundary: &[usize],
) -> Vec<Vec<usize>> {
    let mut out = vec![Vec::new(); vertex_count];
    let mut seen = HashSet::new();
    let mut add = |a: usize, b: usize| {
        if a != b && seen.insert((a, b)) {
            out[a].push(b);
        }
    };
    for &(a, b) in internal {
        add(a, b);
        add(b, a);
    }
    for (k, &a) in boundary.iter().enumerate() {
        add(a, boundary[(k + 1) % boundary.len()]);
    }
    out
}

/// Outgoing edge at `cur` that turns most to the left when arriving from `prev`.
/// Consumes the chosen edge. Going straight back ranks below every real turn.
fn take_left_turn(
    out: &mut [Vec<usize>],
    vertices: &VertexIndex,
    prev: usize,
    cur: usize,
) -> Option<usize> {
    let here = vertices.point(cur);
    let incoming = here - vertices.point(prev);
    let mut best: Option<(usize, f64)> = None;
    for (k, &next) in out[cur].iter().enumerate() {
        let turn = if next == prev {
            f64::NEG_INFINITY
        } else {
            let outgoing = vertices.point(next) - here;
            let cross = incoming.x * outgoing.y - incoming.y * outgoing.x;
            cross.atan2(incoming.dot(&outgoing))
        };
        if best.map_or(true, |(_, t)| turn > t) {
            best = Some((k, turn));
        }
    }
    let (k, _) = best?;
    Some(out[cur].swap_remove(k))
}

/// Walk every directed edge exactly once, emitting the counter-clockwise faces.
pub fn construct_polygons(mut out: Vec<Vec<usize>>, vertices: &VertexIndex) -> Vec<Vec<Point>> {
    let max_steps = out.iter().map(Vec::len).sum::<usize>() + 1;
    let mut polygons = Vec::new();
    for start in 0..out.len() {
        while let Some(first) = out[start].pop() {
            let mut ring = vec![start];
            let (mut prev, mut cur) = (start, first);
            let mut closed = false;
            for _ in 0..max_steps {
                if cur == start {
                    closed = true;
                    break;
                }
                ring.push(cur);
                let Some(next) = take_left_turn(&mut out, vertices, prev, cur) else {
                    break;
                };
                prev = cur;
                cur = next;
            }
            if !closed || ring.len() < 3 {
                warn!(
                    start,
                    vertices = ring.len(),
                    closed,
                    "dropping malformed face"
                );
                continue;
            }
            polygons.push(ring.into_iter().map(|id| vertices.point(id)).collect());
        }
    }
    polygons
}

/// Give each polygon to the first unassigned site it contains.
pub fn assign_polygons(sites: &[Point], polygons: Vec<Vec<Point>>, tol: f64) -> Vec<Cell> {
    let mut taken = vec![false; sites.len()];
    let mut cells = Vec::with_capacity(polygons.len());
    for polygon in polygons {
        let owner = sites
            .iter()
            .enumerate()
            .find(|&(i, &s)| !taken[i] && point_in_polygon(s, &polygon, tol))
            .map(|(i, _)| i);
        match owner {
            Some(i) => {
                taken[i] = true;
                cells.push(Cell {
                    site: SiteId(i),
                    at: sites[i],
                    polygon,
                });
            }
            None => warn!(
                vertices = polygon.len(),
                "polygon contains no unassigned site; dropping it"
            ),
        }
    }
    cells.sort_by_key(|c| c.site);
    cells
}

/// Clipped edges and per-site cells.
#[derive(Clone, Debug, Default)]
pub struct Finished {
    pub segments: Vec<Segment>,
    pub cells: Vec<Cell>,
}

pub fn finish(edges: &HalfEdges, sites: &[Point], bounds: &Bounds, cfg: &GeomCfg) -> Finished {
    let scale = bounds.scale();
    let tol_weld = cfg.eps_weld * scale;
    let clipped = prune_edges(edges, bounds, tol_weld);

    let mut vertices = VertexIndex::new(tol_weld);
    for corner in bounds.corners() {
        vertices.push(corner);
    }
    let mut internal = Vec::with_capacity(clipped.len());
    let mut segments = Vec::with_capacity(clipped.len());
    for seg in clipped {
        let (a, b) = (vertices.insert(seg.a), vertices.insert(seg.b));
        if a == b {
            continue;
        }
        internal.push((a, b));
        segments.push(Segment {
            a: vertices.point(a),
            b: vertices.point(b),
            sites: seg.sites,
        });
    }

    let endpoints = internal.iter().flat_map(|&(a, b)| [a, b]);
    let cycle = boundary_points(&vertices, endpoints, bounds, tol_weld);
    let out = edge_map(vertices.len(), &internal, &cycle);
    let polygons = construct_polygons(out, &vertices);
    debug!(
        edges = segments.len(),
        vertices = vertices.len(),
        boundary = cycle.len(),
        polygons = polygons.len(),
        "assembled faces"
    );
    let cells = assign_polygons(sites, polygons, cfg.eps_inside * scale);
    Finished { segments, cells }
}

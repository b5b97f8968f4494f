//! Sweep driver: the Fortune state machine over one explicit context.
//!
//! States
//! - INIT: queue every site; seed a two-arc beach line when the two highest
//!   sites are level, otherwise the first site event creates the root arc.
//! - LOOP: pop events until the queue drains.
//!   - Site: split the arc above the site, open a new edge pair, re-check circles.
//!   - Circle: fix the Voronoi vertex, close both breakpoint edges, remove the
//!     arc, open the edge of the merged breakpoint, re-check circles.
//! - TERMINAL: hand the half-edges to `dcel::finish`.
//!
//! Circle events are scheduled only for clockwise triples (a vanishing arc
//! needs converging breakpoints) whose circle bottom is not above the sweep line.

use tracing::{debug, trace, warn};

use crate::dcel::HalfEdges;
use crate::geom::{circumcenter, orientation, parabola_y, Bounds, GeomCfg, Point, Site, SiteId};

use super::beachline::{BeachLine, NodeId};
use super::events::{Event, EventQueue};

/// Counters reported after a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub site_events: usize,
    pub circle_events: usize,
    pub scheduled: usize,
    pub cancelled: usize,
    pub level_splits: usize,
}

/// Half-edges traced by a finished sweep.
#[derive(Clone, Debug, Default)]
pub struct SweepOutput {
    pub edges: HalfEdges,
    pub stats: SweepStats,
}

pub struct Sweep<'a> {
    sites: &'a [Point],
    queue: EventQueue,
    beach: BeachLine,
    edges: HalfEdges,
    sweep_y: f64,
    tol_level: f64,
    tol_event: f64,
    /// Relative sine below which a triple counts as collinear.
    eps_collinear: f64,
    stats: SweepStats,
}

impl<'a> Sweep<'a> {
    pub fn new(sites: &'a [Point], bounds: &Bounds, cfg: &GeomCfg) -> Self {
        let scale = bounds.scale();
        Self {
            sites,
            queue: EventQueue::new(),
            beach: BeachLine::new(),
            edges: HalfEdges::new(),
            sweep_y: f64::INFINITY,
            tol_level: cfg.eps_level * scale,
            tol_event: cfg.eps_event * scale,
            eps_collinear: cfg.eps_event,
            stats: SweepStats::default(),
        }
    }

    pub fn run(mut self) -> SweepOutput {
        for (i, &at) in self.sites.iter().enumerate() {
            self.queue.insert(Event::Site(Site::new(SiteId(i), at)));
        }
        self.seed();
        while let Some(event) = self.queue.pop() {
            match event {
                Event::Site(site) => self.handle_site(site),
                Event::Circle {
                    arc,
                    center,
                    bottom,
                } => self.handle_circle(arc, center, bottom),
            }
        }
        debug!(
            sites = self.stats.site_events,
            circles = self.stats.circle_events,
            cancelled = self.stats.cancelled,
            half_edges = self.edges.len(),
            "sweep finished"
        );
        SweepOutput {
            edges: self.edges,
            stats: self.stats,
        }
    }

    /// Two-arc seeding when the two highest sites share a y-coordinate.
    fn seed(&mut self) {
        let Some((&Event::Site(a), &Event::Site(b))) = self.queue.peek_top_two() else {
            return;
        };
        if (a.at.y - b.at.y).abs() > self.tol_level {
            return;
        }
        self.queue.pop();
        self.queue.pop();
        self.stats.site_events += 2;
        self.sweep_y = a.at.y.min(b.at.y);
        let (left, right) = if a.at.x <= b.at.x {
            (a, b)
        } else {
            (b, a)
        };
        let (edge, _) = self.edges.new_edge(nalgebra::center(&left.at, &right.at));
        self.edges.assign_site_vector(edge, left, right);
        self.beach.seed_pair(left, right, edge);
        self.stats.level_splits += 1;
        debug!(
            left = left.id.0,
            right = right.id.0,
            y = self.sweep_y,
            "seeded level pair"
        );
    }

    fn handle_site(&mut self, site: Site) {
        self.stats.site_events += 1;
        self.sweep_y = site.at.y;
        trace!(site = site.id.0, x = site.at.x, y = site.at.y, "site event");

        let Some(arc) = self.beach.find_arc(site.at.x, site.at.y) else {
            self.beach.insert_root(site);
            return;
        };
        let Some(old) = self.beach.site(arc) else {
            warn!(
                site = site.id.0,
                "arc lookup landed on a breakpoint; skipping site"
            );
            return;
        };
        self.cancel_circle_event(arc);

        if old.at.y - site.at.y <= self.tol_level {
            let open_side = if site.at.x >= old.at.x {
                self.beach.successor_leaf(arc).is_none()
            } else {
                self.beach.predecessor_leaf(arc).is_none()
            };
            if open_side {
                self.split_level(arc, old, site);
                return;
            }
            warn!(
                site = site.id.0,
                arc_site = old.id.0,
                "level site inside the beach line; splitting generically"
            );
        }

        let start = if old.at.y - site.at.y > self.tol_level {
            Point::new(site.at.x, parabola_y(old.at, site.at.x, site.at.y))
        } else {
            nalgebra::center(&old.at, &site.at)
        };
        let (edge, twin) = self.edges.new_edge(start);
        self.edges.assign_site_vector(edge, old, site);
        let Some(split) = self.beach.split_arc(arc, site, edge, twin) else {
            return;
        };
        self.check_circle_event(split.left);
        self.check_circle_event(split.right);
    }

    fn split_level(&mut self, arc: NodeId, old: Site, site: Site) {
        let (left, right) = if site.at.x >= old.at.x {
            (old, site)
        } else {
            (site, old)
        };
        let (edge, _) = self.edges.new_edge(nalgebra::center(&left.at, &right.at));
        self.edges.assign_site_vector(edge, left, right);
        let Some((l, r)) = self.beach.split_arc_level(arc, site, edge) else {
            return;
        };
        self.stats.level_splits += 1;
        self.check_circle_event(l);
        self.check_circle_event(r);
    }

    fn handle_circle(&mut self, arc: NodeId, center: Point, bottom: f64) {
        self.stats.circle_events += 1;
        self.sweep_y = bottom;
        self.beach.set_circle_event(arc, None);
        trace!(arc = arc.0, x = center.x, y = center.y, "circle event");

        let (Some(pred), Some(succ)) = self.neighbours(arc) else {
            warn!(arc = arc.0, "circle event on an extreme arc; ignoring");
            return;
        };
        let left_bp = self.beach.predecessor_node(arc);
        let right_bp = self.beach.successor_node(arc);
        let (Some(left_bp), Some(right_bp)) = (left_bp, right_bp) else {
            return;
        };
        let (Some(left), Some(right)) = (self.beach.site(pred), self.beach.site(succ)) else {
            return;
        };
        if let Some(e) = self.beach.breakpoint_edge(left_bp) {
            self.edges.terminate(e, center);
        }
        if let Some(e) = self.beach.breakpoint_edge(right_bp) {
            self.edges.terminate(e, center);
        }

        let Some(merged) = self.beach.remove_arc(arc) else {
            return;
        };
        let (edge, _) = self.edges.new_edge(center);
        self.edges.assign_circle_vector(edge, left, right);
        self.beach.set_breakpoint_edge(merged, edge);

        self.cancel_circle_event(pred);
        self.cancel_circle_event(succ);
        self.check_circle_event(pred);
        self.check_circle_event(succ);
    }

    fn neighbours(&self, arc: NodeId) -> (Option<NodeId>, Option<NodeId>) {
        (
            self.beach.predecessor_leaf(arc),
            self.beach.successor_leaf(arc),
        )
    }

    fn cancel_circle_event(&mut self, arc: NodeId) {
        if let Some(handle) = self.beach.set_circle_event(arc, None) {
            if self.queue.remove(handle).is_some() {
                self.stats.cancelled += 1;
                trace!(arc = arc.0, "cancelled circle event");
            }
        }
    }

    /// Schedule the event at which `arc` would vanish, if its neighbours converge.
    fn check_circle_event(&mut self, arc: NodeId) {
        let (Some(pred), Some(succ)) = self.neighbours(arc) else {
            return;
        };
        let sites = (
            self.beach.site(pred),
            self.beach.site(arc),
            self.beach.site(succ),
        );
        let (Some(a), Some(b), Some(c)) = sites else {
            return;
        };
        if a.id == c.id {
            return;
        }
        let turn = orientation(a.at, b.at, c.at);
        let span = nalgebra::distance(&a.at, &b.at) * nalgebra::distance(&a.at, &c.at);
        if turn >= -self.eps_collinear * span {
            return;
        }
        let Some(center) = circumcenter(a.at, b.at, c.at) else {
            return;
        };
        let bottom = center.y - nalgebra::distance(&center, &b.at);
        if bottom > self.sweep_y + self.tol_event {
            return;
        }
        let handle = self.queue.insert(Event::Circle {
            arc,
            center,
            bottom,
        });
        self.beach.set_circle_event(arc, Some(handle));
        self.stats.scheduled += 1;
        trace!(arc = arc.0, bottom, "scheduled circle event");
    }
}

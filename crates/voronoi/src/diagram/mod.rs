//! Public entry point: build a clipped Voronoi diagram from a site set.
//!
//! Purpose
//! - Validate input, run the sweep, and finish the half-edges into one
//!   counter-clockwise polygon per site inside a bounding box.
//!
//! Output
//! - `Diagram::cells`: one `Cell` per site that owns a polygon, sorted by site id.
//! - `Diagram::edges`: the clipped Voronoi edges, tagged with the two sites they separate.
//!
//! Code cross-refs: `sweep::Sweep`, `dcel::finish`.

use std::fmt;

use tracing::{info, warn};

use crate::dcel;
use crate::geom::{point_in_polygon, Bounds, GeomCfg, Point, SiteId};
use crate::sweep::Sweep;

/// Voronoi cell of one site, clipped to the box.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub site: SiteId,
    /// Position of the site.
    pub at: Point,
    /// Counter-clockwise vertices, first vertex not repeated.
    pub polygon: Vec<Point>,
}

/// Clipped Voronoi edge; `sites.0` owns the cell on the left of `a → b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
    pub sites: (SiteId, SiteId),
}

#[derive(Clone, Debug)]
pub struct Diagram {
    pub bounds: Bounds,
    pub cells: Vec<Cell>,
    pub edges: Vec<Segment>,
    inside_tol: f64,
}

impl Diagram {
    pub fn empty(bounds: Bounds, cfg: &GeomCfg) -> Self {
        Self {
            bounds,
            cells: Vec::new(),
            edges: Vec::new(),
            inside_tol: cfg.eps_inside * bounds.scale(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_of(&self, site: SiteId) -> Option<&Cell> {
        let k = self.cells.binary_search_by_key(&site, |c| c.site).ok()?;
        Some(&self.cells[k])
    }

    /// All cells whose closed polygon contains `q`; more than one on shared boundaries.
    pub fn containing(&self, q: Point) -> impl Iterator<Item = &Cell> + '_ {
        self.cells
            .iter()
            .filter(move |c| point_in_polygon(q, &c.polygon, self.inside_tol))
    }

    /// Site of the first cell containing `q`.
    pub fn locate(&self, q: Point) -> Option<SiteId> {
        self.containing(q).next().map(|c| c.site)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum VoronoiError {
    /// The box is empty, inverted, or not finite.
    InvalidBounds { bounds: Bounds },
    /// A site coordinate is NaN or infinite.
    NonFiniteSite { index: usize },
    /// A site lies outside the box.
    SiteOutOfBounds { index: usize },
    /// Two sites coincide.
    DuplicateSite { first: usize, second: usize },
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::InvalidBounds { bounds } => write!(
                f,
                "invalid bounds [{}, {}] x [{}, {}]",
                bounds.left, bounds.right, bounds.bottom, bounds.top
            ),
            VoronoiError::NonFiniteSite { index } => {
                write!(f, "site {index} has a non-finite coordinate")
            }
            VoronoiError::SiteOutOfBounds { index } => {
                write!(f, "site {index} lies outside the bounding box")
            }
            VoronoiError::DuplicateSite { first, second } => {
                write!(f, "sites {first} and {second} coincide")
            }
        }
    }
}

impl std::error::Error for VoronoiError {}

fn validate(sites: &[Point], bounds: &Bounds, cfg: &GeomCfg) -> Result<(), VoronoiError> {
    if !bounds.is_valid() {
        return Err(VoronoiError::InvalidBounds { bounds: *bounds });
    }
    let tol = cfg.eps_weld * bounds.scale();
    for (index, p) in sites.iter().enumerate() {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(VoronoiError::NonFiniteSite { index });
        }
        if !bounds.contains(*p, tol) {
            return Err(VoronoiError::SiteOutOfBounds { index });
        }
    }
    let mut order: Vec<usize> = (0..sites.len()).collect();
    order.sort_by(|&i, &j| {
        sites[i]
            .x
            .total_cmp(&sites[j].x)
            .then(sites[i].y.total_cmp(&sites[j].y))
            .then(i.cmp(&j))
    });
    for w in order.windows(2) {
        if sites[w[0]] == sites[w[1]] {
            return Err(VoronoiError::DuplicateSite {
                first: w[0],
                second: w[1],
            });
        }
    }
    Ok(())
}

/// Voronoi diagram of `sites` clipped to `bounds`.
///
/// Fewer than two sites give an empty diagram.
pub fn build_diagram(
    sites: &[Point],
    bounds: Bounds,
    cfg: GeomCfg,
) -> Result<Diagram, VoronoiError> {
    validate(sites, &bounds, &cfg)?;
    if sites.len() < 2 {
        info!(sites = sites.len(), "fewer than two sites; empty diagram");
        return Ok(Diagram::empty(bounds, &cfg));
    }
    let output = Sweep::new(sites, &bounds, &cfg).run();
    let finished = dcel::finish(&output.edges, sites, &bounds, &cfg);
    if finished.cells.len() != sites.len() {
        warn!(
            sites = sites.len(),
            cells = finished.cells.len(),
            "some sites did not receive a cell"
        );
    }
    info!(
        sites = sites.len(),
        cells = finished.cells.len(),
        edges = finished.segments.len(),
        circle_events = output.stats.circle_events,
        "diagram built"
    );
    let mut diagram = Diagram::empty(bounds, &cfg);
    diagram.cells = finished.cells;
    diagram.edges = finished.segments;
    Ok(diagram)
}

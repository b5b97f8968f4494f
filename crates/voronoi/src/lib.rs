//! Voronoi diagrams via Fortune's sweep-line algorithm.
//!
//! Layout
//! - `geom`: points, bounds, tolerances, parabola/circumcircle primitives, polygon predicates.
//! - `sweep`: event queue, beach line, and the sweep driver that emits half-edges.
//! - `dcel`: half-edge arena plus the finisher (clip, stitch boundary, assemble polygons).
//! - `diagram`: `build_diagram` entry point and output types.
//! - `sample`: reproducible random site sets.
//!
//! The sweep line moves from `+y` towards `-y`. All tolerances in `GeomCfg` are
//! relative to the bounding box extent.

pub mod dcel;
pub mod diagram;
pub mod geom;
pub mod sample;
pub mod sweep;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use diagram::{build_diagram, Cell, Diagram, Segment, VoronoiError};
pub use geom::{point_in_polygon, Bounds, GeomCfg, Point, SiteId, Vector};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::diagram::{build_diagram, Cell, Diagram, Segment, VoronoiError};
    pub use crate::geom::{point_in_polygon, Bounds, GeomCfg, Point, SiteId, Vector};
    pub use crate::sample::{random_lattice_sites, random_sites};
}

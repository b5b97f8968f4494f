//! Planar geometry used by the sweep and the finisher.
//!
//! Purpose
//! - Keep every numeric predicate of the algorithm in one place: parabola
//!   breakpoints, circumcircles, bisector directions, and convex polygon
//!   membership.
//! - Points and directions are nalgebra types (`Point2`, `Vector2`) so that
//!   `point - point = vector` and `point + vector = point` hold at the type level.
//!
//! Code cross-refs: `sweep::BeachLine::find_arc`, `sweep::Sweep`, `dcel::finish`.

mod polygon;
mod primitives;
mod types;

pub use polygon::{
    cross_product, point_in_polygon, point_in_triangle, point_on_segment, signed_area,
};
pub use primitives::{
    bisector_direction, breakpoint_x, circle_bottom_y, circumcenter, orientation,
    parabola_intersection, parabola_y,
};
pub use types::{Bounds, GeomCfg, Point, Site, SiteId, Vector};

#[cfg(test)]
mod tests;

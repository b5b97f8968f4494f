//! Parabola, bisector, and circumcircle primitives.
//!
//! Conventions
//! - The sweep line is the horizontal directrix `y = d`, moving downwards.
//! - A site `f` above the directrix defines the parabola of points equidistant
//!   from `f` and the directrix.
//! - A breakpoint `(left, right)` is the intersection of the two parabolas
//!   where `left`'s arc lies on the left of it and `right`'s arc on the right.
//!
//! References
//! - S. Fortune, "A sweepline algorithm for Voronoi diagrams", 1987.
//! - de Berg et al., Computational Geometry, ch. 7.

use super::types::{Point, Vector};

/// Twice the signed area of triangle `abc`; positive for a counter-clockwise turn.
#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Height of the parabola with `focus` and directrix `y = directrix` above `x`.
///
/// Requires `focus.y > directrix`.
#[inline]
pub fn parabola_y(focus: Point, x: f64, directrix: f64) -> f64 {
    let p = focus.y - directrix;
    let dx = x - focus.x;
    dx * dx / (2.0 * p) + 0.5 * (focus.y + directrix)
}

/// x-coordinate of the breakpoint between `left`'s arc and `right`'s arc.
///
/// Degenerate cases:
/// - equal heights: the bisector is vertical, so the midpoint;
/// - a focus on (or below) the directrix: its parabola is the vertical ray above it.
///
/// General case: the relevant root of the parabola-parabola quadratic, written
/// so that no two large terms of similar size are subtracted. With
/// `p1 = y1 - d`, `p2 = y2 - d`, `(dx, dy) = right - left` and `L = |right - left|`
/// the offset from `left.x` is
/// `p1 (dx² + p2 dy) / (√(p1 p2) L + dx p1)` for `dx ≥ 0`, and
/// `(√(p1 p2) L - dx p1) / dy` otherwise.
pub fn breakpoint_x(left: Point, right: Point, directrix: f64) -> f64 {
    let dx = right.x - left.x;
    let dy = right.y - left.y;
    if dy == 0.0 {
        return left.x + 0.5 * dx;
    }
    let p1 = left.y - directrix;
    let p2 = right.y - directrix;
    if p1 <= 0.0 {
        return left.x;
    }
    if p2 <= 0.0 {
        return right.x;
    }
    let root = (p1 * p2).sqrt() * dx.hypot(dy);
    let u = if dx >= 0.0 {
        p1 * (dx * dx + p2 * dy) / (root + dx * p1)
    } else {
        (root - dx * p1) / dy
    };
    left.x + u
}

/// Breakpoint of the arcs of `left` and `right` for the given directrix.
///
/// The height is read off the focus farther from the directrix, which keeps the
/// division well conditioned when the other focus sits on the sweep line.
pub fn parabola_intersection(left: Point, right: Point, directrix: f64) -> Point {
    let x = breakpoint_x(left, right, directrix);
    let focus = if left.y >= right.y { left } else { right };
    if focus.y - directrix <= 0.0 {
        return Point::new(x, f64::INFINITY);
    }
    Point::new(x, parabola_y(focus, x, directrix))
}

/// Direction travelled by the breakpoint `(left, right)` as the sweep descends.
///
/// This is the perpendicular of `right - left` rotated clockwise, so `right`
/// lies on the left-hand side of the travel direction.
#[inline]
pub fn bisector_direction(left: Point, right: Point) -> Vector {
    Vector::new(right.y - left.y, left.x - right.x)
}

/// Center of the circle through `a`, `b`, `c`; `None` for collinear input.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * (ab.x * ac.y - ab.y * ac.x);
    if d == 0.0 || !d.is_finite() {
        return None;
    }
    let ab2 = ab.norm_squared();
    let ac2 = ac.norm_squared();
    let offset = Vector::new(ac.y * ab2 - ab.y * ac2, ab.x * ac2 - ac.x * ab2) / d;
    let center = a + offset;
    let finite = center.x.is_finite() && center.y.is_finite();
    finite.then_some(center)
}

/// Lowest point (y) of the circle through `a`, `b`, `c`.
pub fn circle_bottom_y(a: Point, b: Point, c: Point) -> Option<f64> {
    let center = circumcenter(a, b, c)?;
    Some(center.y - nalgebra::distance(&center, &a))
}

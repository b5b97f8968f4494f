//! Convex polygon predicates.
//!
//! Polygons are vertex lists in counter-clockwise order without repeating the
//! first vertex. All tests are boundary-inclusive with an absolute slack `tol`
//! measured as a distance from the supporting line of an edge.

use super::primitives::orientation;
use super::types::Point;

/// Cross product of `b - a` and `c - a`.
#[inline]
pub fn cross_product(a: Point, b: Point, c: Point) -> f64 {
    orientation(a, b, c)
}

/// Signed area (positive for counter-clockwise vertex order).
pub fn signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        acc += a.x * b.y - a.y * b.x;
    }
    0.5 * acc
}

#[inline]
fn left_of(a: Point, b: Point, q: Point, tol: f64) -> bool {
    let len = nalgebra::distance(&a, &b);
    orientation(a, b, q) >= -tol * len
}

/// `q` lies on the closed segment `ab` up to `tol`.
pub fn point_on_segment(q: Point, a: Point, b: Point, tol: f64) -> bool {
    let ab = b - a;
    let len = ab.norm();
    if len <= tol {
        return nalgebra::distance(&a, &q) <= tol;
    }
    if orientation(a, b, q).abs() > tol * len {
        return false;
    }
    let t = (q - a).dot(&ab);
    t >= -tol * len && t <= len * len + tol * len
}

/// Inclusive test for the counter-clockwise triangle `abc`.
pub fn point_in_triangle(q: Point, a: Point, b: Point, c: Point, tol: f64) -> bool {
    left_of(a, b, q, tol) && left_of(b, c, q, tol) && left_of(c, a, q, tol)
}

/// Inclusive membership test for a convex counter-clockwise polygon.
///
/// First tries the triangle spanned by vertices `0`, `n/3`, `2n/3`; if that
/// misses, `q` must lie inside the fan wedge at `polygon[0]` and is located in
/// it by binary search over the fan diagonals.
pub fn point_in_polygon(q: Point, polygon: &[Point], tol: f64) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let (a, b, c) = (polygon[0], polygon[n / 3], polygon[2 * n / 3]);
    // Skip the fast path for a sliver triangle: it would accept points on its
    // supporting line outside the polygon.
    let sliver = orientation(a, b, c) <= tol * nalgebra::distance(&a, &c);
    if !sliver && point_in_triangle(q, a, b, c, tol) {
        return true;
    }

    let p0 = polygon[0];
    if !left_of(p0, polygon[1], q, tol) || !left_of(polygon[n - 1], p0, q, tol) {
        return false;
    }
    let (mut lo, mut hi) = (1, n - 1);
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if orientation(p0, polygon[mid], q) >= 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    left_of(polygon[lo], polygon[hi], q, tol)
}

//! Core types: points, sites, the clipping box, and tolerances.

/// Position in the plane.
pub type Point = nalgebra::Point2<f64>;
/// Direction or displacement in the plane.
pub type Vector = nalgebra::Vector2<f64>;

/// Index of an input site in the caller's slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub usize);

/// A site together with its position; carried by arcs and site events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    pub id: SiteId,
    pub at: Point,
}

impl Site {
    #[inline]
    pub fn new(id: SiteId, at: Point) -> Self {
        Self { id, at }
    }
}

/// Axis-aligned clipping box `[left, right] × [bottom, top]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Bounds {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// The square `[-n, n] × [-n, n]`.
    pub fn square(half_extent: f64) -> Self {
        Self::new(-half_extent, half_extent, -half_extent, half_extent)
    }

    /// Finite and non-degenerate in both axes.
    pub fn is_valid(&self) -> bool {
        [self.left, self.right, self.bottom, self.top]
            .iter()
            .all(|v| v.is_finite())
            && self.left < self.right
            && self.bottom < self.top
    }

    /// Reference length for relative tolerances: the larger half-extent, at least 1.
    pub fn scale(&self) -> f64 {
        let hx = 0.5 * (self.right - self.left);
        let hy = 0.5 * (self.top - self.bottom);
        hx.max(hy).max(1.0)
    }

    /// Inclusive containment with slack `tol`.
    pub fn contains(&self, p: Point, tol: f64) -> bool {
        p.x >= self.left - tol
            && p.x <= self.right + tol
            && p.y >= self.bottom - tol
            && p.y <= self.top + tol
    }

    /// Corners in counter-clockwise order starting at bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.bottom),
            Point::new(self.right, self.bottom),
            Point::new(self.right, self.top),
            Point::new(self.left, self.top),
        ]
    }

    /// Move `p` onto the box: coordinates within `tol` of a side snap to it,
    /// everything else is clamped.
    pub fn snap(&self, p: Point, tol: f64) -> Point {
        let snap_axis = |v: f64, lo: f64, hi: f64| {
            if (v - lo).abs() <= tol {
                lo
            } else if (v - hi).abs() <= tol {
                hi
            } else {
                v.clamp(lo, hi)
            }
        };
        Point::new(
            snap_axis(p.x, self.left, self.right),
            snap_axis(p.y, self.bottom, self.top),
        )
    }
}

/// Numerical tolerances. Every field is relative: multiply by `Bounds::scale()`
/// to obtain an absolute length.
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Two sites count as level (same y) for the two-arc seeding.
    pub eps_level: f64,
    /// Circle bottoms this far above the sweep line are still admitted; also the
    /// relative sine below which three sites count as collinear.
    pub eps_event: f64,
    /// Vertices closer than this are welded; points this close to a side lie on it.
    pub eps_weld: f64,
    /// Slack for boundary-inclusive point-in-polygon tests.
    pub eps_inside: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_level: 1e-12,
            eps_event: 1e-9,
            eps_weld: 1e-9,
            eps_inside: 1e-9,
        }
    }
}

use super::*;
use proptest::prelude::*;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn breakpoint_x_picks_branch_by_site_order() {
    let d = -1.0;
    // Lower site on the left: its arc is the narrow middle, breakpoint is the right root.
    let x = breakpoint_x(p(2.0, 0.0), p(0.0, 2.0), d);
    assert!((x - (3.0 + 6f64.sqrt())).abs() < 1e-12);
    // Same pair, opposite order: the left root.
    let x = breakpoint_x(p(0.0, 2.0), p(2.0, 0.0), d);
    assert!((x - (3.0 - 6f64.sqrt())).abs() < 1e-12);
    // dx >= 0 branch with the lower site on the left.
    let x = breakpoint_x(p(0.0, 0.0), p(2.0, 2.0), d);
    assert!((x - (6f64.sqrt() - 1.0)).abs() < 1e-12);
}

#[test]
fn breakpoint_x_degenerate_cases() {
    // Equal heights: vertical bisector.
    assert_eq!(breakpoint_x(p(-1.0, 3.0), p(5.0, 3.0), 0.0), 2.0);
    // A focus on the directrix pins the breakpoint above it.
    assert_eq!(breakpoint_x(p(1.0, 0.0), p(4.0, 3.0), 0.0), 1.0);
    assert_eq!(breakpoint_x(p(-2.0, 5.0), p(7.0, 0.0), 0.0), 7.0);
}

#[test]
fn parabola_intersection_is_equidistant() {
    let (a, b, d) = (p(0.0, 2.0), p(2.0, 0.0), -1.0);
    let q = parabola_intersection(a, b, d);
    let da = nalgebra::distance(&q, &a);
    let db = nalgebra::distance(&q, &b);
    assert!((da - db).abs() < 1e-12);
    assert!((da - (q.y - d)).abs() < 1e-12);
    // Focus on the sweep line: the point sits on the other parabola straight above it.
    let q = parabola_intersection(p(0.0, 4.0), p(2.0, 0.0), 0.0);
    assert_eq!(q.x, 2.0);
    assert!((q.y - parabola_y(p(0.0, 4.0), 2.0, 0.0)).abs() < 1e-12);
}

#[test]
fn circumcircle_of_triangle() {
    let (a, b, c) = (p(0.0, 0.0), p(4.0, 0.0), p(2.0, 4.0));
    let center = circumcenter(a, b, c).unwrap();
    assert!((center - p(2.0, 1.5)).norm() < 1e-12);
    let bottom = circle_bottom_y(a, b, c).unwrap();
    assert!((bottom + 1.0).abs() < 1e-12);
    // Collinear: no circle.
    assert!(circumcenter(a, p(1.0, 1.0), p(2.0, 2.0)).is_none());
    assert!(circle_bottom_y(a, b, p(8.0, 0.0)).is_none());
}

#[test]
fn bisector_direction_keeps_right_site_on_the_left() {
    let (l, r) = (p(0.0, 0.0), p(3.0, 1.0));
    let dir = bisector_direction(l, r);
    assert!(dir.dot(&(r - l)).abs() < 1e-12);
    let mid = nalgebra::center(&l, &r);
    assert!(orientation(mid, mid + dir, r) > 0.0);
    assert!(orientation(mid, mid + dir, l) < 0.0);
    // Level pair: the breakpoint moves straight down.
    let dir = bisector_direction(p(0.0, 0.0), p(4.0, 0.0));
    assert_eq!(dir, Vector::new(0.0, -4.0));
}

#[test]
fn orientation_sign() {
    assert!(orientation(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)) > 0.0);
    assert!(orientation(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)) < 0.0);
    assert_eq!(orientation(p(0.0, 0.0), p(1.0, 1.0), p(3.0, 3.0)), 0.0);
    assert_eq!(cross_product(p(0.0, 0.0), p(2.0, 0.0), p(0.0, 3.0)), 6.0);
}

#[test]
fn point_in_square_is_boundary_inclusive() {
    let sq = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
    assert!(point_in_polygon(p(1.0, 1.0), &sq, 0.0));
    assert!(point_in_polygon(p(2.0, 1.0), &sq, 0.0));
    assert!(point_in_polygon(p(0.0, 0.0), &sq, 0.0));
    assert!(point_in_polygon(p(0.0, 2.0 + 1e-10), &sq, 1e-9));
    assert!(!point_in_polygon(p(2.1, 1.0), &sq, 1e-9));
    assert!(!point_in_polygon(p(-0.5, -0.5), &sq, 1e-9));
    assert!((signed_area(&sq) - 4.0).abs() < 1e-12);
}

#[test]
fn point_in_polygon_fan_search() {
    // Regular octagon: the fast-path triangle misses most of it.
    let poly: Vec<Point> = (0..8)
        .map(|k| {
            let t = std::f64::consts::TAU * (k as f64) / 8.0;
            p(t.cos(), t.sin())
        })
        .collect();
    assert!(point_in_polygon(p(0.0, 0.0), &poly, 1e-12));
    assert!(point_in_polygon(p(0.9, 0.1), &poly, 1e-12));
    assert!(point_in_polygon(p(-0.2, -0.9), &poly, 1e-12));
    assert!(!point_in_polygon(p(0.72, 0.72), &poly, 1e-12));
    assert!(!point_in_polygon(p(0.0, -1.01), &poly, 1e-12));
    // Midpoint of the closing edge.
    let m = nalgebra::center(&poly[7], &poly[0]);
    assert!(point_in_polygon(m, &poly, 1e-12));
}

#[test]
fn sliver_fast_path_rejects_points_past_collinear_side() {
    // Vertices 0, 2, 4 are collinear along the bottom side.
    let poly = [
        p(0.0, 0.0),
        p(1.0, 0.0),
        p(2.0, 0.0),
        p(3.0, 0.0),
        p(4.0, 0.0),
        p(4.0, 1.0),
    ];
    assert!(!point_in_polygon(p(5.0, 0.0), &poly, 1e-9));
    assert!(point_in_polygon(p(3.9, 0.5), &poly, 1e-9));
}

#[test]
fn segment_and_triangle_predicates() {
    let (a, b) = (p(0.0, 0.0), p(4.0, 0.0));
    assert!(point_on_segment(p(2.0, 0.0), a, b, 1e-12));
    assert!(point_on_segment(p(4.0, 1e-13), a, b, 1e-12));
    assert!(!point_on_segment(p(5.0, 0.0), a, b, 1e-12));
    assert!(!point_on_segment(p(2.0, 0.1), a, b, 1e-12));
    let c = p(2.0, 4.0);
    assert!(point_in_triangle(p(2.0, 1.5), a, b, c, 0.0));
    assert!(!point_in_triangle(p(0.0, 4.0), a, b, c, 0.0));
}

#[test]
fn bounds_helpers() {
    let b = Bounds::square(5.0);
    assert!(b.is_valid());
    assert_eq!(b.scale(), 5.0);
    assert_eq!(Bounds::square(0.25).scale(), 1.0);
    assert!(!Bounds::new(1.0, 1.0, 0.0, 2.0).is_valid());
    assert!(!Bounds::new(0.0, f64::NAN, 0.0, 2.0).is_valid());
    assert!(b.contains(p(5.0, -5.0), 0.0));
    assert!(!b.contains(p(5.1, 0.0), 1e-3));
    assert_eq!(b.snap(p(5.0 - 1e-12, 3.0), 1e-9), p(5.0, 3.0));
    assert_eq!(b.snap(p(7.0, -9.0), 1e-9), p(5.0, -5.0));
    assert_eq!(b.corners()[2], p(5.0, 5.0));
}

proptest! {
    #[test]
    fn breakpoint_is_equidistant_from_both_foci(
        x1 in -50.0f64..50.0, y1 in 0.5f64..50.0,
        x2 in -50.0f64..50.0, y2 in 0.5f64..50.0,
    ) {
        prop_assume!((y1 - y2).abs() > 1e-3);
        let (a, b) = (p(x1, y1), p(x2, y2));
        let q = parabola_intersection(a, b, 0.0);
        let da = nalgebra::distance(&q, &a);
        let db = nalgebra::distance(&q, &b);
        prop_assert!((da - db).abs() <= 1e-7 * (1.0 + da));
        prop_assert!((da - q.y).abs() <= 1e-7 * (1.0 + da));
    }

    #[test]
    fn breakpoints_of_swapped_pair_bracket_the_lower_site(
        x1 in -50.0f64..50.0, y1 in 0.5f64..50.0,
        x2 in -50.0f64..50.0, y2 in 0.5f64..50.0,
    ) {
        prop_assume!((y1 - y2).abs() > 1e-3);
        let (a, b) = (p(x1, y1), p(x2, y2));
        let lower = if y1 < y2 { a } else { b };
        let left = breakpoint_x(a, b, 0.0).min(breakpoint_x(b, a, 0.0));
        let right = breakpoint_x(a, b, 0.0).max(breakpoint_x(b, a, 0.0));
        prop_assert!(left <= lower.x + 1e-9 && lower.x <= right + 1e-9);
    }
}

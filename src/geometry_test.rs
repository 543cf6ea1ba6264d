#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// =============================================================
// snap_to_grid
// =============================================================

#[test]
fn snap_rounds_to_nearest_multiple() {
    assert_eq!(snap_to_grid(120.0, 50.0), 100.0);
    assert_eq!(snap_to_grid(125.0, 50.0), 150.0);
    assert_eq!(snap_to_grid(-26.0, 50.0), -50.0);
    assert_eq!(snap_to_grid(0.0, 50.0), 0.0);
}

#[test]
fn snap_is_idempotent() {
    for cell in [1.0, 7.5, 25.0, 50.0, 64.0] {
        let mut v = -517.3;
        while v < 517.3 {
            let once = snap_to_grid(v, cell);
            assert_eq!(snap_to_grid(once, cell), once, "v={v} cell={cell}");
            v += 13.7;
        }
    }
}

#[test]
fn snap_with_non_positive_cell_is_identity() {
    assert_eq!(snap_to_grid(12.3, 0.0), 12.3);
    assert_eq!(snap_to_grid(12.3, -5.0), 12.3);
}

// =============================================================
// distance_point_to_segment
// =============================================================

#[test]
fn distance_perpendicular_to_interior() {
    let d = distance_point_to_segment(Point::new(5.0, 3.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert!(approx_eq(d, 3.0));
}

#[test]
fn distance_clamps_to_endpoint_a() {
    let d = distance_point_to_segment(Point::new(-3.0, 4.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn distance_clamps_to_endpoint_b() {
    let d = distance_point_to_segment(Point::new(13.0, -4.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn distance_to_degenerate_segment_is_point_distance() {
    let d = distance_point_to_segment(Point::new(3.0, 4.0), Point::new(0.0, 0.0), Point::new(0.0, 0.0));
    assert!(approx_eq(d, 5.0));
}

#[test]
fn distance_on_diagonal_segment_is_zero() {
    let d = distance_point_to_segment(Point::new(5.0, 5.0), Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    assert!(approx_eq(d, 0.0));
}

// =============================================================
// snap_angle
// =============================================================

#[test]
fn snap_angle_triggers_at_44_and_46_degrees() {
    for deg in [44.0_f64, 46.0] {
        let s = snap_angle(deg.to_radians());
        assert!(s.is_snapped, "{deg} should snap");
        assert_eq!(s.angle, FRAC_PI_4);
    }
}

#[test]
fn snap_angle_does_not_trigger_at_43_degrees() {
    let s = snap_angle(43.0_f64.to_radians());
    assert!(!s.is_snapped);
    assert!(approx_eq(s.angle, 43.0_f64.to_radians()));
}

#[test]
fn snap_angle_does_not_trigger_at_47_degrees() {
    let s = snap_angle(47.0_f64.to_radians());
    assert!(!s.is_snapped);
}

#[test]
fn snap_angle_normalizes_negative_input() {
    let s = snap_angle(-FRAC_PI_2);
    assert!(s.is_snapped);
    assert!(approx_eq(s.angle, 3.0 * FRAC_PI_2));
}

#[test]
fn snap_angle_near_full_turn_wraps_to_zero() {
    let s = snap_angle(359.0_f64.to_radians());
    assert!(s.is_snapped);
    assert_eq!(s.angle, 0.0);
}

#[test]
fn snap_angle_unsnapped_is_normalized() {
    let s = snap_angle(2.0 * PI + 0.3);
    assert!(!s.is_snapped);
    assert!(approx_eq(s.angle, 0.3));
}

#[test]
fn display_degrees_wraps() {
    assert_eq!(display_degrees(0.0), 0);
    assert_eq!(display_degrees(FRAC_PI_4), 45);
    assert_eq!(display_degrees(-FRAC_PI_2), 270);
    assert_eq!(display_degrees(359.7_f64.to_radians()), 0);
}

// =============================================================
// local/world frames
// =============================================================

#[test]
fn local_world_roundtrip() {
    let center = Point::new(50.0, 40.0);
    let local = Point::new(-20.0, 13.0);
    let world = local_to_world(local, center, 0.7);
    let back = world_to_local(world, center, 0.7);
    assert!(approx_eq(back.x, local.x));
    assert!(approx_eq(back.y, local.y));
}

#[test]
fn local_to_world_quarter_turn() {
    let w = local_to_world(Point::new(0.0, -10.0), Point::new(0.0, 0.0), FRAC_PI_2);
    assert!(approx_eq(w.x, 10.0));
    assert!(approx_eq(w.y, 0.0));
}

// =============================================================
// cell_at / nearest_corner
// =============================================================

#[test]
fn cell_at_floors() {
    assert_eq!(cell_at(Point::new(49.9, 50.0), 50.0), (0, 1));
    assert_eq!(cell_at(Point::new(-0.1, -50.0), 50.0), (-1, -1));
}

#[test]
fn nearest_corner_rounds() {
    assert_eq!(nearest_corner(Point::new(24.0, 26.0), 50.0), (0, 1));
    assert_eq!(nearest_corner(Point::new(-74.0, 130.0), 50.0), (-1, 3));
}

//! Integration tests for the 2D viewport transform

use polekit_designer::viewport::{screen_to_world, world_to_screen, zoom_at};
use polekit_designer::{Point, SurfaceSize, Viewport};
use proptest::prelude::*;

fn close(a: Point, b: Point) -> bool {
    let scale = 1.0 + a.x.abs().max(a.y.abs()).max(b.x.abs()).max(b.y.abs());
    (a.x - b.x).abs() <= 1e-9 * scale && (a.y - b.y).abs() <= 1e-9 * scale
}

#[test]
fn test_screen_to_world_applies_pan_then_zoom() {
    let world = screen_to_world(Point::new(300.0, 200.0), Point::new(100.0, 50.0), 2.0);
    assert_eq!(world, Point::new(100.0, 75.0));
}

#[test]
fn test_zoom_clamps_at_both_ends() {
    let mut viewport = Viewport::new();
    viewport.set_zoom(100.0);
    assert_eq!(viewport.zoom(), 5.0);
    viewport.set_zoom(0.0001);
    assert_eq!(viewport.zoom(), 0.1);
    viewport.set_zoom(-3.0);
    assert_eq!(viewport.zoom(), 0.1);
}

#[test]
fn test_zoom_in_and_out_use_toolbar_step() {
    let mut viewport = Viewport::new();
    viewport.zoom_in();
    assert!((viewport.zoom() - 1.2).abs() < 1e-12);
    viewport.zoom_out();
    viewport.zoom_out();
    assert!((viewport.zoom() - 1.0 / 1.2).abs() < 1e-12);
}

#[test]
fn test_non_finite_zoom_factor_is_ignored() {
    let mut viewport = Viewport::new();
    viewport.set_pan(Point::new(10.0, 20.0));
    viewport.zoom_by(Point::new(5.0, 5.0), f64::NAN);
    viewport.zoom_by(Point::new(5.0, 5.0), f64::INFINITY);
    assert_eq!(viewport.zoom(), 1.0);
    assert_eq!(viewport.pan(), Point::new(10.0, 20.0));
}

#[test]
fn test_wheel_zoom_keeps_point_under_cursor() {
    // zoom 2 with a prior pan, wheel-in at (300, 200)
    let mut viewport = Viewport::new();
    viewport.set_zoom(2.0);
    viewport.set_pan(Point::new(-120.0, 35.0));
    let anchor = Point::new(300.0, 200.0);
    let before = viewport.screen_to_world(anchor);

    viewport.zoom_by(anchor, 1.1);

    assert!((viewport.zoom() - 2.2).abs() < 1e-12);
    assert!(close(viewport.screen_to_world(anchor), before));
}

#[test]
fn test_reset_restores_identity() {
    let mut viewport = Viewport::with_surface(SurfaceSize { width: 800.0, height: 600.0 });
    viewport.set_zoom(3.0);
    viewport.pan_by(Point::new(40.0, -10.0));
    viewport.reset();
    assert_eq!(viewport.zoom(), 1.0);
    assert_eq!(viewport.pan(), Point::ORIGIN);
    assert!(viewport.is_attached());
}

#[test]
fn test_surface_rejects_degenerate_sizes() {
    let mut viewport = Viewport::new();
    assert!(viewport.set_surface(0.0, 600.0).is_err());
    assert!(viewport.set_surface(800.0, -1.0).is_err());
    assert!(viewport.set_surface(f64::NAN, 600.0).is_err());
    assert!(!viewport.is_attached());
    assert!(viewport.set_surface(800.0, 600.0).is_ok());
    assert!(viewport.is_attached());
}

#[test]
fn test_visible_bounds_follow_pan_and_zoom() {
    let mut viewport = Viewport::with_surface(SurfaceSize { width: 800.0, height: 600.0 });
    viewport.set_zoom(2.0);
    viewport.set_pan(Point::new(100.0, 0.0));
    let (top_left, bottom_right) = viewport.visible_world_bounds().unwrap();
    assert_eq!(top_left, Point::new(-50.0, 0.0));
    assert_eq!(bottom_right, Point::new(350.0, 300.0));
    assert!(Viewport::new().visible_world_bounds().is_none());
}

#[test]
fn test_display_shows_percentage() {
    let mut viewport = Viewport::new();
    viewport.set_zoom(1.5);
    assert!(viewport.to_string().starts_with("Zoom: 150%"));
}

proptest! {
    #[test]
    fn zoom_stays_in_range(start in 0.1f64..=5.0, factor in -1.0e6f64..1.0e6) {
        let (_, zoom) = zoom_at(Point::new(10.0, 10.0), factor, Point::ORIGIN, start);
        prop_assert!((0.1..=5.0).contains(&zoom));
    }

    #[test]
    fn screen_world_round_trip(
        x in -1.0e4f64..1.0e4,
        y in -1.0e4f64..1.0e4,
        px in -1.0e4f64..1.0e4,
        py in -1.0e4f64..1.0e4,
        zoom in 0.1f64..=5.0,
    ) {
        let p = Point::new(x, y);
        let pan = Point::new(px, py);
        let back = screen_to_world(world_to_screen(p, pan, zoom), pan, zoom);
        prop_assert!(close(back, p), "{:?} != {:?}", back, p);
    }

    #[test]
    fn zoom_at_keeps_anchor_fixed(
        sx in 0.0f64..2000.0,
        sy in 0.0f64..2000.0,
        px in -1.0e3f64..1.0e3,
        py in -1.0e3f64..1.0e3,
        zoom in 0.1f64..=5.0,
        factor in 0.01f64..100.0,
    ) {
        let anchor = Point::new(sx, sy);
        let pan = Point::new(px, py);
        let before = screen_to_world(anchor, pan, zoom);
        let (new_pan, new_zoom) = zoom_at(anchor, factor, pan, zoom);
        let after = screen_to_world(anchor, new_pan, new_zoom);
        prop_assert!(close(before, after), "{:?} != {:?}", before, after);
    }
}

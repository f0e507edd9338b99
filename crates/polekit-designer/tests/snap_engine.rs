//! Integration tests for anchor generation and nearest-anchor lookup

use polekit_designer::snap::{build_snap_points, ground_line_y, ground_points, pole_top_points};
use polekit_designer::{
    nearest_snap, Point, Pole, PoleId, ProfileCatalog, SnapConfig, SnapEngine, SnapKind,
    SnapPoint, SurfaceSize, Viewport,
};

fn pole(id: u64, x: f64, base: f64, height: f64) -> Pole {
    let profile = ProfileCatalog::default().resolve("circular").unwrap();
    Pole::new(PoleId(id), profile, Point::new(x, base), height)
}

#[test]
fn test_single_pole_top_at_ground_baseline() {
    let poles = [pole(1, 100.0, 0.0, 5.0)];
    let points = build_snap_points(&poles, 0.0, 50.0, 50.0, 1.0, 1200.0);

    let tops: Vec<&SnapPoint> = points.iter().filter(|p| p.kind == SnapKind::PoleTop).collect();
    assert_eq!(tops.len(), 1);
    assert_eq!(tops[0].point(), Point::new(100.0, -5.0));
    assert_eq!(tops[0].source, Some(PoleId(1)));

    let ground: Vec<f64> = points
        .iter()
        .filter(|p| p.kind == SnapKind::Ground)
        .map(|p| p.x)
        .collect();
    assert_eq!(ground.len(), 22);
    for pair in ground.windows(2) {
        assert!((pair[1] - pair[0] - 50.0).abs() < 1e-9);
    }
}

#[test]
fn test_ground_points_span_visible_width() {
    let points = ground_points(750.0, 50.0, 50.0, 1.0, 1200.0);
    assert_eq!(points.first().map(|p| p.x), Some(50.0));
    assert_eq!(points.last().map(|p| p.x), Some(1100.0));
    assert!(points.iter().all(|p| p.y == 750.0 && p.source.is_none()));
}

#[test]
fn test_ground_spacing_scales_inversely_with_zoom() {
    let at_two = ground_points(0.0, 50.0, 50.0, 2.0, 1200.0);
    assert_eq!(at_two[0].x, 25.0);
    assert_eq!(at_two[1].x, 50.0);
    // (1200 - 50) / 2 = 575 is the exclusive end
    assert_eq!(at_two.last().map(|p| p.x), Some(575.0 - 25.0));
}

#[test]
fn test_ground_points_degenerate_inputs_are_empty() {
    assert!(ground_points(0.0, 0.0, 50.0, 1.0, 1200.0).is_empty());
    assert!(ground_points(0.0, 50.0, 50.0, 1.0, f64::INFINITY).is_empty());
    assert!(ground_points(0.0, 50.0, 50.0, 1.0, 40.0).is_empty());
}

#[test]
fn test_ground_line_depends_on_zoom() {
    assert_eq!(ground_line_y(800.0, 50.0, 1.0), 750.0);
    assert_eq!(ground_line_y(800.0, 50.0, 2.0), 375.0);
}

#[test]
fn test_stacked_pole_top_includes_base_height() {
    let tops = pole_top_points(&[pole(1, 50.0, 6.0, 4.0)], 750.0);
    assert_eq!(tops[0].point(), Point::new(50.0, 740.0));
}

#[test]
fn test_nearest_prefers_earlier_on_tie() {
    // Ground anchor first, pole-top second, both 5 units away.
    let points = [
        SnapPoint::ground(100.0, 10.0),
        SnapPoint::pole_top(100.0, 0.0, PoleId(7)),
    ];
    let hit = nearest_snap(&Point::new(100.0, 5.0), &points, 30.0).unwrap();
    assert_eq!(hit.kind, SnapKind::Ground);
}

#[test]
fn test_nearest_threshold_is_strict() {
    let points = [SnapPoint::ground(0.0, 0.0)];
    assert!(nearest_snap(&Point::new(30.0, 0.0), &points, 30.0).is_none());
    assert!(nearest_snap(&Point::new(29.999, 0.0), &points, 30.0).is_some());
}

#[test]
fn test_nearest_picks_closest_not_first() {
    let points = [
        SnapPoint::ground(0.0, 0.0),
        SnapPoint::ground(10.0, 0.0),
    ];
    let hit = nearest_snap(&Point::new(8.0, 0.0), &points, 30.0).unwrap();
    assert_eq!(hit.x, 10.0);
}

#[test]
fn test_nearest_on_empty_list() {
    assert!(nearest_snap(&Point::ORIGIN, &[], 30.0).is_none());
}

#[test]
fn test_engine_is_empty_while_detached() {
    let engine = SnapEngine::new(SnapConfig::default());
    let poles = [pole(1, 100.0, 0.0, 6.0)];
    assert!(engine.build(&poles, &Viewport::new()).is_empty());
    assert!(engine.ground_y(&Viewport::new()).is_none());
}

#[test]
fn test_engine_uses_surface_and_zoom() {
    let engine = SnapEngine::new(SnapConfig::default());
    let mut viewport = Viewport::with_surface(SurfaceSize { width: 1200.0, height: 800.0 });
    viewport.set_zoom(2.0);
    let poles = [pole(1, 100.0, 0.0, 6.0)];

    let points = engine.build(&poles, &viewport);
    assert_eq!(points.last().map(|p| p.point()), Some(Point::new(100.0, 369.0)));
    assert_eq!(points[0].point(), Point::new(25.0, 375.0));
}

#[test]
fn test_catch_radius_is_not_rescaled_by_zoom() {
    let engine = SnapEngine::new(SnapConfig::default());
    let points = [SnapPoint::ground(100.0, 100.0)];
    // 29 world units away is always a catch, whatever the zoom.
    assert!(engine.nearest(&Point::new(129.0, 100.0), &points).is_some());
    assert!(engine.nearest(&Point::new(131.0, 100.0), &points).is_none());
}

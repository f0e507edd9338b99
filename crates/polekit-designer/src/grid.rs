//! Background grid for the 2D view.

use polekit_core::constants::DEFAULT_GRID_SIZE;
use serde::{Deserialize, Serialize};

use crate::model::Point;
use crate::viewport::Viewport;

/// Grid display and snapping options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub visible: bool,
    pub snap_to_grid: bool,
    /// Spacing between grid lines in world units.
    pub size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            snap_to_grid: true,
            size: DEFAULT_GRID_SIZE,
        }
    }
}

/// Rounds both coordinates to the nearest multiple of `size`.
///
/// A non-positive or non-finite size leaves the point unchanged.
pub fn snap_to_grid(point: Point, size: f64) -> Point {
    if !(size.is_finite() && size > 0.0) {
        return point;
    }
    Point::new(
        (point.x / size).round() * size,
        (point.y / size).round() * size,
    )
}

/// World coordinates of the grid lines crossing the visible area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
}

// Below this on-screen spacing the grid is a solid wash, so nothing is drawn.
const MIN_LINE_SPACING_PX: f64 = 2.0;

/// Grid lines covering the viewport's visible world rectangle.
///
/// Empty when the surface is detached or the spacing is unusable.
pub fn grid_lines(viewport: &Viewport, size: f64) -> GridLines {
    let Some((top_left, bottom_right)) = viewport.visible_world_bounds() else {
        return GridLines::default();
    };
    if !(size.is_finite() && size > 0.0) || size * viewport.zoom() < MIN_LINE_SPACING_PX {
        return GridLines::default();
    }
    GridLines {
        vertical: lines_between(top_left.x, bottom_right.x, size),
        horizontal: lines_between(top_left.y, bottom_right.y, size),
    }
}

fn lines_between(start: f64, end: f64, size: f64) -> Vec<f64> {
    let first = (start / size).floor() as i64;
    (first..)
        .map(|k| k as f64 * size)
        .take_while(|&v| v < end)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::SurfaceSize;

    #[test]
    fn test_snap_to_grid_rounds_to_nearest() {
        let snapped = snap_to_grid(Point::new(74.0, 26.0), 50.0);
        assert_eq!(snapped, Point::new(50.0, 50.0));
        assert_eq!(snap_to_grid(Point::new(-26.0, 0.0), 50.0).x, -50.0);
    }

    #[test]
    fn test_snap_to_grid_ignores_bad_size() {
        let p = Point::new(12.3, 4.5);
        assert_eq!(snap_to_grid(p, 0.0), p);
        assert_eq!(snap_to_grid(p, f64::NAN), p);
    }

    #[test]
    fn test_grid_lines_cover_visible_area() {
        let viewport = Viewport::with_surface(SurfaceSize { width: 120.0, height: 60.0 });
        let lines = grid_lines(&viewport, 50.0);
        assert_eq!(lines.vertical, vec![0.0, 50.0, 100.0]);
        assert_eq!(lines.horizontal, vec![0.0, 50.0]);
    }

    #[test]
    fn test_grid_lines_detached_is_empty() {
        assert_eq!(grid_lines(&Viewport::new(), 50.0), GridLines::default());
    }
}

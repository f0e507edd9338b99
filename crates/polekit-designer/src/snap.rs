//! Anchor ("snap point") generation and nearest-anchor lookup.
//!
//! Anchors are derived data: they are rebuilt from the pole set and viewport
//! whenever either changes and are never stored anywhere else.
//!
//! Two kinds exist:
//! - **ground**: evenly spaced along the ground line. The spacing is fixed in
//!   screen pixels, so the world-space spacing is `spacing_px / zoom`.
//! - **pole-top**: one per pole, at the top of that pole.
//!
//! The catch radius used by [`nearest_snap`] is a fixed number of world units.
//! It is deliberately not rescaled with zoom: zooming in shrinks the on-screen
//! catch radius and zooming out grows it.

use polekit_core::constants::{
    GROUND_MARGIN_PX, POLE_HIT_HALF_WIDTH, SNAP_MAX_DISTANCE, SNAP_SPACING_PX,
};
use serde::{Deserialize, Serialize};

use crate::model::{Point, Pole, PoleId};
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapKind {
    Ground,
    PoleTop,
}

/// A candidate anchor in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapPoint {
    pub x: f64,
    pub y: f64,
    pub kind: SnapKind,
    /// Source pole for `pole-top` anchors. Lookup only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PoleId>,
}

impl SnapPoint {
    pub fn ground(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            kind: SnapKind::Ground,
            source: None,
        }
    }

    pub fn pole_top(x: f64, y: f64, source: PoleId) -> Self {
        Self {
            x,
            y,
            kind: SnapKind::PoleTop,
            source: Some(source),
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Tunables for anchor generation and picking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Screen-space distance between ground anchors.
    pub spacing_px: f64,
    /// Screen-space margin at the surface edges and below the ground line.
    pub ground_margin_px: f64,
    /// Catch radius in world units.
    pub max_distance: f64,
    /// Half-width of the pole hit box in world units.
    pub hit_half_width: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            spacing_px: SNAP_SPACING_PX,
            ground_margin_px: GROUND_MARGIN_PX,
            max_distance: SNAP_MAX_DISTANCE,
            hit_half_width: POLE_HIT_HALF_WIDTH,
        }
    }
}

/// World y of the ground line for a surface of `surface_height` pixels.
pub fn ground_line_y(surface_height: f64, margin_px: f64, zoom: f64) -> f64 {
    (surface_height - margin_px) / zoom
}

/// Ground anchors from `spacing/zoom` up to (not including) `(width - margin)/zoom`.
pub fn ground_points(
    ground_y: f64,
    spacing_px: f64,
    margin_px: f64,
    zoom: f64,
    surface_width: f64,
) -> Vec<SnapPoint> {
    let step = spacing_px / zoom;
    let end = (surface_width - margin_px) / zoom;
    if !(step > 0.0 && step.is_finite() && end.is_finite()) {
        return Vec::new();
    }
    let mut points = Vec::new();
    let mut k = 1u32;
    loop {
        let x = f64::from(k) * step;
        if x >= end {
            break;
        }
        points.push(SnapPoint::ground(x, ground_y));
        k += 1;
    }
    points
}

/// One anchor on top of every pole, stacking included.
pub fn pole_top_points<'a>(
    poles: impl IntoIterator<Item = &'a Pole>,
    ground_y: f64,
) -> Vec<SnapPoint> {
    poles
        .into_iter()
        .map(|pole| SnapPoint::pole_top(pole.position.x, pole.top_y(ground_y), pole.id))
        .collect()
}

/// Full anchor list: ground anchors first, then pole tops in pole order.
pub fn build_snap_points<'a>(
    poles: impl IntoIterator<Item = &'a Pole>,
    ground_y: f64,
    spacing_px: f64,
    margin_px: f64,
    zoom: f64,
    surface_width: f64,
) -> Vec<SnapPoint> {
    let mut points = ground_points(ground_y, spacing_px, margin_px, zoom, surface_width);
    points.extend(pole_top_points(poles, ground_y));
    points
}

/// Nearest anchor strictly closer than `max_distance`.
///
/// Ties resolve to the anchor that appears first in `snap_points`.
pub fn nearest_snap(point: &Point, snap_points: &[SnapPoint], max_distance: f64) -> Option<SnapPoint> {
    let mut best = None;
    let mut min_distance = max_distance;
    for candidate in snap_points {
        let distance = point.distance_to(&candidate.point());
        if distance < min_distance {
            min_distance = distance;
            best = Some(*candidate);
        }
    }
    best
}

/// Anchor generation bound to a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapEngine {
    config: SnapConfig,
}

impl SnapEngine {
    pub fn new(config: SnapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Ground line for the viewport's surface, or `None` while detached.
    pub fn ground_y(&self, viewport: &Viewport) -> Option<f64> {
        let surface = viewport.surface()?;
        Some(ground_line_y(
            surface.height,
            self.config.ground_margin_px,
            viewport.zoom(),
        ))
    }

    /// Anchors for the current poles and viewport. Empty while detached.
    pub fn build<'a>(
        &self,
        poles: impl IntoIterator<Item = &'a Pole>,
        viewport: &Viewport,
    ) -> Vec<SnapPoint> {
        let (Some(surface), Some(ground_y)) = (viewport.surface(), self.ground_y(viewport)) else {
            return Vec::new();
        };
        build_snap_points(
            poles,
            ground_y,
            self.config.spacing_px,
            self.config.ground_margin_px,
            viewport.zoom(),
            surface.width,
        )
    }

    /// Nearest anchor within the configured catch radius.
    pub fn nearest(&self, point: &Point, snap_points: &[SnapPoint]) -> Option<SnapPoint> {
        nearest_snap(point, snap_points, self.config.max_distance)
    }
}

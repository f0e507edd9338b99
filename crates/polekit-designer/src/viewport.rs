//! Viewport and coordinate transformation for the 2D schematic.
//!
//! Handles conversion between screen coordinates (pointer pixels relative to
//! the render surface) and world coordinates (where poles and anchors live).
//! Both axes point the same way in both spaces; only pan and zoom differ:
//!
//! ```text
//! world  = (screen - pan) / zoom
//! screen = world * zoom + pan
//! ```

use std::fmt;

use polekit_core::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use polekit_core::InputError;
use serde::{Deserialize, Serialize};

use crate::model::Point;

/// Pixel size of the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    /// Validates a size reported by the host window.
    pub fn new(width: f64, height: f64) -> Result<Self, InputError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(InputError::InvalidSurface { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Clamps a zoom value into the supported range.
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Converts a screen point to world coordinates.
pub fn screen_to_world(screen: Point, pan: Point, zoom: f64) -> Point {
    (screen - pan) / zoom
}

/// Converts a world point to screen coordinates.
pub fn world_to_screen(world: Point, pan: Point, zoom: f64) -> Point {
    world * zoom + pan
}

/// Zooms by `factor` while keeping the world point under `anchor` fixed on screen.
///
/// The new zoom is clamped to `[0.1, 5]`. A non-finite factor leaves the view
/// unchanged.
pub fn zoom_at(anchor: Point, factor: f64, pan: Point, zoom: f64) -> (Point, f64) {
    if !factor.is_finite() {
        return (pan, zoom);
    }
    let new_zoom = clamp_zoom(zoom * factor);
    let new_pan = anchor - (anchor - pan) * (new_zoom / zoom);
    (new_pan, new_zoom)
}

/// Represents the viewport transformation state (zoom and pan) of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Point,
    surface: Option<SurfaceSize>,
}

impl Viewport {
    /// Creates a viewport at 100% zoom with no pan and no surface attached.
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::ORIGIN,
            surface: None,
        }
    }

    /// Creates a viewport already attached to a surface.
    pub fn with_surface(surface: SurfaceSize) -> Self {
        Self {
            surface: Some(surface),
            ..Self::new()
        }
    }

    /// Gets the attached surface, if any.
    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    /// Whether a render surface is attached.
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Attaches or resizes the surface (typically called when the window resizes).
    pub fn set_surface(&mut self, width: f64, height: f64) -> Result<SurfaceSize, InputError> {
        let surface = SurfaceSize::new(width, height)?;
        self.surface = Some(surface);
        Ok(surface)
    }

    /// Detaches the surface; queries become no-ops until one is attached again.
    pub fn detach_surface(&mut self) {
        self.surface = None;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to `[0.1, 5]`. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = clamp_zoom(zoom);
        }
    }

    /// Zooms in by multiplying current zoom by 1.2.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Zooms out by dividing current zoom by 1.2.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Zooms by `factor` keeping the world point under `anchor` (screen space) fixed.
    pub fn zoom_by(&mut self, anchor: Point, factor: f64) {
        let (pan, zoom) = zoom_at(anchor, factor, self.pan, self.zoom);
        self.pan = pan;
        self.zoom = zoom;
    }

    /// Gets the pan offset in screen pixels.
    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, pan: Point) {
        if pan.is_finite() {
            self.pan = pan;
        }
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.set_pan(self.pan + delta);
    }

    /// Converts a screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        screen_to_world(screen, self.pan, self.zoom)
    }

    /// Converts a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        world_to_screen(world, self.pan, self.zoom)
    }

    /// World-space rectangle currently visible, as `(top_left, bottom_right)`.
    pub fn visible_world_bounds(&self) -> Option<(Point, Point)> {
        let surface = self.surface?;
        let top_left = self.screen_to_world(Point::ORIGIN);
        let bottom_right = self.screen_to_world(Point::new(surface.width, surface.height));
        Some((top_left, bottom_right))
    }

    /// Resets zoom to 100% and pan to the origin.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::ORIGIN;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Pan: ({:.1}, {:.1})",
            self.zoom * 100.0,
            self.pan.x,
            self.pan.y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

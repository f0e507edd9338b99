//! Numeric constants shared between the 2D and 3D views.
//!
//! Anything both views read (zoom clamp, bridge constants, snap geometry)
//! lives here so there is exactly one definition of each value.

/// Smallest zoom the 2D viewport accepts.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom the 2D viewport accepts.
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplier applied by the toolbar zoom-in / zoom-out buttons.
pub const ZOOM_STEP: f64 = 1.2;

/// Wheel zoom factor when scrolling towards the user (`delta_y > 0`).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Wheel zoom factor when scrolling away from the user.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Horizontal world offset of the 3D scene origin.
pub const BRIDGE_OFFSET: f64 = 400.0;

/// World units per scene unit on the horizontal axis.
pub const BRIDGE_SCALE: f64 = 100.0;

/// Screen-space spacing between ground anchors, in pixels.
pub const SNAP_SPACING_PX: f64 = 50.0;

/// Screen-space margin kept free at the surface edges and below the ground line.
pub const GROUND_MARGIN_PX: f64 = 50.0;

/// Catch radius for anchors, in world units. Not rescaled by zoom.
pub const SNAP_MAX_DISTANCE: f64 = 30.0;

/// Half-width of the hit box used to pick a pole in the 2D view.
pub const POLE_HIT_HALF_WIDTH: f64 = 10.0;

/// Height given to newly placed poles, in metres.
pub const DEFAULT_POLE_HEIGHT: f64 = 6.0;

/// Default grid cell size, in world units.
pub const DEFAULT_GRID_SIZE: f64 = 50.0;

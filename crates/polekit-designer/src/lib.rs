//! # PoleKit Designer
//!
//! The editing engine behind the pole placement tool. A single pole
//! collection is shown through two views: a 2D schematic with pan, zoom and
//! anchor snapping, and a 3D scene with an orbit camera. Both views mutate
//! the same [`PoleStore`], so every change is visible in the other view
//! immediately.
//!
//! ## Architecture
//!
//! ```text
//! Editor (session)
//!   ├── PoleStore (shared, Rc<RefCell<_>>)
//!   ├── PlacementController (2D)
//!   │     ├── Viewport (pan/zoom, screen <-> world)
//!   │     ├── SnapEngine (ground + pole-top anchors)
//!   │     └── SelectionManager (hit testing)
//!   ├── SceneView (3D)
//!   │     ├── OrbitCamera
//!   │     └── CoordinateBridge (world x <-> scene x)
//!   └── renderer (2D raster snapshot)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use polekit_designer::{Editor, EditorOptions, InputEvent, Modifiers, Point, PointerButton};
//!
//! let mut editor = Editor::new(EditorOptions::default());
//! editor.handle_input(InputEvent::Resize { width: 1200.0, height: 800.0 });
//! editor.choose_profile("circular").unwrap();
//!
//! // Ground anchors sit every 50 px on the ground line (y = 750 at 100% zoom).
//! editor.handle_input(InputEvent::Click {
//!     pos: Point::new(102.0, 748.0),
//!     button: PointerButton::Primary,
//!     modifiers: Modifiers::NONE,
//! });
//! assert_eq!(editor.poles().len(), 1);
//! assert_eq!(editor.poles()[0].position, Point::new(100.0, 0.0));
//! ```

pub mod bridge;
pub mod catalog;
pub mod editor;
pub mod grid;
pub mod model;
pub mod placement;
pub mod pole_store;
pub mod renderer;
pub mod scene;
pub mod selection_manager;
pub mod snap;
pub mod viewport;

pub use bridge::CoordinateBridge;
pub use catalog::ProfileCatalog;
pub use editor::{Confirm, Editor, EditorOptions, PoleInfo, ViewMode};
pub use grid::{grid_lines, snap_to_grid, GridLines, GridSettings};
pub use model::{Dimensions, Point, Pole, PoleId, PoleMesh, Profile, ProfileKind, ProfileShape};
pub use placement::{
    starts_pan, CanvasFrame, CursorMode, InputEvent, Modifiers, PlacementController,
    PlacementEvent, PlacementState, PointerButton,
};
pub use pole_store::PoleStore;
pub use renderer::{export_png, render_canvas};
pub use scene::{OrbitCamera, ScenePole, SceneView};
pub use selection_manager::SelectionManager;
pub use snap::{nearest_snap, SnapConfig, SnapEngine, SnapKind, SnapPoint};
pub use viewport::{SurfaceSize, Viewport};

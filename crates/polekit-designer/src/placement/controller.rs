//! The 2D placement state machine.
//!
//! ```text
//!            choose_profile                 click near an anchor
//!   Idle ───────────────────► Aiming ───────────────────────────► Idle
//!    ▲                          │  click far from every anchor:
//!    └──────── cancel ──────────┘  stays Aiming, nothing placed
//! ```
//!
//! While `Idle`, a primary click picks a pole (exclusive selection) or
//! clears the selection. A pan gesture (middle button, or Ctrl + primary)
//! suppresses hover previews and clicks until it is released, and the click
//! the host delivers right after a primary-button pan is swallowed.

use std::rc::Rc;

use polekit_core::constants::{WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use polekit_core::{InputError, Shared};
use serde::Serialize;
use tracing::{debug, info};

use super::input::{starts_pan, InputEvent, Modifiers, PointerButton};
use crate::model::{Point, Pole, PoleId, Profile};
use crate::pole_store::PoleStore;
use crate::selection_manager::SelectionManager;
use crate::snap::{SnapConfig, SnapEngine, SnapKind, SnapPoint};
use crate::viewport::{SurfaceSize, Viewport};

/// Whether the user is placing a new pole.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementState {
    /// No profile chosen; clicks select poles.
    Idle,
    /// A profile is chosen and the next anchored click places it.
    Aiming { profile: Profile },
}

impl PlacementState {
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Idle => None,
            Self::Aiming { profile } => Some(profile),
        }
    }

    pub fn is_aiming(&self) -> bool {
        matches!(self, Self::Aiming { .. })
    }
}

/// Pointer cursor the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorMode {
    Default,
    Crosshair,
    Grabbing,
}

/// What an input changed, for the host to react to (redraw, inspector, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlacementEvent {
    ProfileChosen { profile_id: String },
    ProfileCleared,
    PoleAdded {
        id: PoleId,
        anchor: SnapKind,
        position: Point,
    },
    PoleSelected { id: PoleId },
    SelectionCleared,
    PanStarted,
    PanEnded,
    ViewChanged { zoom: f64, pan: Point },
    SurfaceResized { width: f64, height: f64 },
}

/// Everything a renderer needs to draw one frame of the 2D view.
#[derive(Debug, Clone)]
pub struct CanvasFrame {
    pub zoom: f64,
    pub pan: Point,
    pub surface: Option<SurfaceSize>,
    pub ground_y: Option<f64>,
    pub poles: Vec<Pole>,
    pub snap_points: Vec<SnapPoint>,
    pub preview: Option<SnapPoint>,
    pub preview_height: f64,
    pub cursor: CursorMode,
    pub aiming: bool,
}

#[derive(Debug, Clone, Copy)]
struct PanGesture {
    button: PointerButton,
    last: Point,
}

/// Inputs the cached anchor list was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SnapKey {
    revision: u64,
    zoom: f64,
    surface: Option<SurfaceSize>,
    aiming: bool,
}

/// Drives pointer interaction for one 2D view.
///
/// The controller owns its viewport and shares the pole store with any other
/// view. Anchors are rebuilt whenever the store revision, zoom, surface, or
/// aiming state differs from what the cached list was built from, so poles
/// changed through another view never leave stale anchors behind.
pub struct PlacementController {
    store: Shared<PoleStore>,
    viewport: Viewport,
    engine: SnapEngine,
    selection: SelectionManager,
    state: PlacementState,
    pan: Option<PanGesture>,
    swallow_click: bool,
    hover: Option<Point>,
    snap_points: Vec<SnapPoint>,
    preview: Option<SnapPoint>,
    snap_key: Option<SnapKey>,
}

impl PlacementController {
    /// Creates an idle controller with no surface attached.
    pub fn new(store: Shared<PoleStore>, config: SnapConfig) -> Self {
        Self {
            store,
            viewport: Viewport::new(),
            engine: SnapEngine::new(config),
            selection: SelectionManager::with_half_width(config.hit_half_width),
            state: PlacementState::Idle,
            pan: None,
            swallow_click: false,
            hover: None,
            snap_points: Vec::new(),
            preview: None,
            snap_key: None,
        }
    }

    /// Creates an idle controller attached to `surface`.
    pub fn with_surface(store: Shared<PoleStore>, config: SnapConfig, surface: SurfaceSize) -> Self {
        let mut controller = Self::new(store, config);
        controller.viewport = Viewport::with_surface(surface);
        controller.refresh();
        controller
    }

    /// Handle to the shared pole store.
    pub fn store(&self) -> Shared<PoleStore> {
        Rc::clone(&self.store)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn snap_config(&self) -> &SnapConfig {
        self.engine.config()
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.state.profile()
    }

    pub fn is_aiming(&self) -> bool {
        self.state.is_aiming()
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    pub fn cursor(&self) -> CursorMode {
        if self.pan.is_some() {
            CursorMode::Grabbing
        } else if self.state.is_aiming() {
            CursorMode::Crosshair
        } else {
            CursorMode::Default
        }
    }

    /// World y of the ground line, or `None` while detached.
    pub fn ground_y(&self) -> Option<f64> {
        self.engine.ground_y(&self.viewport)
    }

    /// Current anchors, rebuilt first if anything they derive from changed.
    pub fn snap_points(&mut self) -> &[SnapPoint] {
        self.refresh();
        &self.snap_points
    }

    /// Anchor the pointer is currently hovering within catch range, if aiming.
    pub fn preview(&mut self) -> Option<SnapPoint> {
        self.refresh();
        self.preview
    }

    /// Arms placement with a copy of `profile`.
    pub fn choose_profile(&mut self, profile: Profile) -> PlacementEvent {
        info!(profile = %profile.id, "Profile chosen, aiming");
        let profile_id = profile.id.clone();
        self.state = PlacementState::Aiming { profile };
        self.refresh();
        PlacementEvent::ProfileChosen { profile_id }
    }

    /// Disarms placement. Returns `None` if no profile was chosen.
    pub fn clear_profile(&mut self) -> Option<PlacementEvent> {
        if !self.state.is_aiming() {
            return None;
        }
        debug!("Profile cleared");
        self.state = PlacementState::Idle;
        self.hover = None;
        self.refresh();
        Some(PlacementEvent::ProfileCleared)
    }

    /// Dispatches one input event in delivery order.
    pub fn handle(&mut self, event: InputEvent) -> Option<PlacementEvent> {
        match event {
            InputEvent::Resize { width, height } => self.on_resize(width, height).ok(),
            InputEvent::Cancel => self.cancel(),
            InputEvent::PointerDown {
                pos,
                button,
                modifiers,
            } => self.on_pointer_down(pos, button, modifiers),
            InputEvent::PointerMove { pos } => self.on_pointer_move(pos),
            InputEvent::PointerUp { pos, button } => self.on_pointer_up(pos, button),
            InputEvent::Click {
                pos,
                button,
                modifiers,
            } => self.on_click(pos, button, modifiers),
            InputEvent::Wheel { pos, delta_y } => self.on_wheel(pos, delta_y),
        }
    }

    /// Attaches or resizes the render surface.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Result<PlacementEvent, InputError> {
        let surface = self.viewport.set_surface(width, height)?;
        self.refresh();
        Ok(PlacementEvent::SurfaceResized {
            width: surface.width,
            height: surface.height,
        })
    }

    pub fn on_pointer_down(
        &mut self,
        pos: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Option<PlacementEvent> {
        if !self.viewport.is_attached() || !starts_pan(button, modifiers) {
            return None;
        }
        debug!(x = pos.x, y = pos.y, ?button, "Pan started");
        self.pan = Some(PanGesture { button, last: pos });
        Some(PlacementEvent::PanStarted)
    }

    pub fn on_pointer_move(&mut self, pos: Point) -> Option<PlacementEvent> {
        if !self.viewport.is_attached() {
            return None;
        }
        if let Some(gesture) = self.pan.as_mut() {
            let delta = pos - gesture.last;
            gesture.last = pos;
            self.viewport.pan_by(delta);
            return Some(self.view_changed());
        }
        self.hover = self.state.is_aiming().then_some(pos);
        self.refresh();
        None
    }

    pub fn on_pointer_up(&mut self, pos: Point, button: PointerButton) -> Option<PlacementEvent> {
        let gesture = self.pan.filter(|g| g.button == button)?;
        self.pan = None;
        // The host follows a primary release with a click; that click belongs to the pan.
        self.swallow_click = gesture.button == PointerButton::Primary;
        self.hover = self.state.is_aiming().then_some(pos);
        self.refresh();
        debug!("Pan ended");
        Some(PlacementEvent::PanEnded)
    }

    pub fn on_click(
        &mut self,
        pos: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Option<PlacementEvent> {
        if button != PointerButton::Primary {
            return None;
        }
        if std::mem::take(&mut self.swallow_click) {
            debug!("Ignoring click that ended a pan");
            return None;
        }
        if !self.viewport.is_attached() || self.pan.is_some() || modifiers.ctrl {
            return None;
        }
        self.refresh();
        let world = self.viewport.screen_to_world(pos);
        if self.state.is_aiming() {
            self.commit(world)
        } else {
            self.select_at(world)
        }
    }

    pub fn on_wheel(&mut self, pos: Point, delta_y: f64) -> Option<PlacementEvent> {
        if !self.viewport.is_attached() || !delta_y.is_finite() || delta_y == 0.0 {
            return None;
        }
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.viewport.zoom_by(pos, factor);
        self.refresh();
        Some(self.view_changed())
    }

    /// Ends a pan in progress and leaves aiming mode.
    pub fn cancel(&mut self) -> Option<PlacementEvent> {
        let was_panning = self.pan.take().is_some();
        self.swallow_click = false;
        match self.clear_profile() {
            Some(event) => Some(event),
            None if was_panning => Some(PlacementEvent::PanEnded),
            None => None,
        }
    }

    pub fn zoom_in(&mut self) -> PlacementEvent {
        self.viewport.zoom_in();
        self.refresh();
        self.view_changed()
    }

    pub fn zoom_out(&mut self) -> PlacementEvent {
        self.viewport.zoom_out();
        self.refresh();
        self.view_changed()
    }

    pub fn reset_view(&mut self) -> PlacementEvent {
        self.viewport.reset();
        self.refresh();
        self.view_changed()
    }

    /// Snapshot for the renderer.
    pub fn frame(&mut self) -> CanvasFrame {
        self.refresh();
        let store = self.store.borrow();
        CanvasFrame {
            zoom: self.viewport.zoom(),
            pan: self.viewport.pan(),
            surface: self.viewport.surface(),
            ground_y: self.engine.ground_y(&self.viewport),
            poles: store.iter().cloned().collect(),
            snap_points: self.snap_points.clone(),
            preview: self.preview,
            preview_height: store.default_height(),
            cursor: self.cursor(),
            aiming: self.state.is_aiming(),
        }
    }

    /// Rebuilds anchors and the hover preview if their inputs changed.
    pub fn refresh(&mut self) {
        let key = SnapKey {
            revision: self.store.borrow().revision(),
            zoom: self.viewport.zoom(),
            surface: self.viewport.surface(),
            aiming: self.state.is_aiming(),
        };
        if self.snap_key != Some(key) {
            let points = if key.aiming {
                let store = self.store.borrow();
                self.engine.build(store.iter(), &self.viewport)
            } else {
                Vec::new()
            };
            debug!(count = points.len(), revision = key.revision, "Rebuilt snap points");
            self.snap_points = points;
            self.snap_key = Some(key);
        }
        if self.pan.is_none() {
            self.preview = self
                .hover
                .filter(|_| self.state.is_aiming())
                .map(|screen| self.viewport.screen_to_world(screen))
                .and_then(|world| self.engine.nearest(&world, &self.snap_points));
        }
    }

    fn commit(&mut self, world: Point) -> Option<PlacementEvent> {
        let PlacementState::Aiming { profile } = &self.state else {
            return None;
        };
        let Some(anchor) = self.engine.nearest(&world, &self.snap_points) else {
            debug!(x = world.x, y = world.y, "No anchor in range, nothing placed");
            return None;
        };
        let profile = profile.clone();
        let position = resolve_anchor(&self.store.borrow(), &anchor);
        let id = self.store.borrow_mut().add_pole(profile, position);
        info!(%id, anchor = ?anchor.kind, x = position.x, y = position.y, "Placed pole");

        self.state = PlacementState::Idle;
        self.hover = None;
        self.refresh();
        Some(PlacementEvent::PoleAdded {
            id,
            anchor: anchor.kind,
            position,
        })
    }

    fn select_at(&mut self, world: Point) -> Option<PlacementEvent> {
        let ground_y = self.engine.ground_y(&self.viewport)?;
        let hit = self
            .selection
            .select_at(&mut self.store.borrow_mut(), &world, ground_y);
        self.refresh();
        Some(match hit {
            Some(id) => PlacementEvent::PoleSelected { id },
            None => PlacementEvent::SelectionCleared,
        })
    }

    fn view_changed(&self) -> PlacementEvent {
        PlacementEvent::ViewChanged {
            zoom: self.viewport.zoom(),
            pan: self.viewport.pan(),
        }
    }
}

/// Base position for a pole placed on `anchor`.
///
/// Ground anchors give `(x, 0)`. Pole-top anchors give
/// `(base.x, base.height)`, stacking the new pole on the source pole. A
/// pole-top anchor whose source is gone falls back to the ground.
fn resolve_anchor(store: &PoleStore, anchor: &SnapPoint) -> Point {
    match anchor.kind {
        SnapKind::Ground => Point::new(anchor.x, 0.0),
        SnapKind::PoleTop => anchor
            .source
            .and_then(|id| store.get(id))
            .map(|base| Point::new(base.position.x, base.height))
            .unwrap_or_else(|| Point::new(anchor.x, 0.0)),
    }
}

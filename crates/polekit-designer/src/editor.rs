//! Editing session: one pole store shown through a 2D and a 3D view.
//!
//! The [`Editor`] owns the shared [`PoleStore`] and hands a handle to each
//! view. Only one view is active at a time; choosing a profile arms the
//! active view, and switching views carries an armed profile across.

use std::fmt;

use image::RgbImage;
use nalgebra::Point3;
use polekit_core::{shared, Error, InputError, PoleError, ProfileError, Shared};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bridge::CoordinateBridge;
use crate::catalog::ProfileCatalog;
use crate::grid::GridSettings;
use crate::model::{Dimensions, Point, Pole, PoleId, Profile, ProfileKind};
use crate::placement::{CanvasFrame, InputEvent, PlacementController, PlacementEvent};
use crate::pole_store::PoleStore;
use crate::renderer::render_canvas;
use crate::scene::SceneView;
use crate::snap::SnapConfig;
use crate::viewport::SurfaceSize;

/// Which view receives placement input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "3d")]
    ThreeD,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoD => write!(f, "2d"),
            Self::ThreeD => write!(f, "3d"),
        }
    }
}

/// Asks the user to approve a destructive command.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Everything needed to build an [`Editor`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub snap: SnapConfig,
    pub bridge: CoordinateBridge,
    pub default_height: f64,
    pub grid: GridSettings,
    pub initial_view: ViewMode,
    pub surface: Option<SurfaceSize>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            bridge: CoordinateBridge::STANDARD,
            default_height: polekit_core::constants::DEFAULT_POLE_HEIGHT,
            grid: GridSettings::default(),
            initial_view: ViewMode::TwoD,
            surface: None,
        }
    }
}

/// Inspector summary of one pole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoleInfo {
    pub id: PoleId,
    pub profile_id: String,
    pub profile_name: String,
    pub kind: ProfileKind,
    /// Position rounded to whole world units.
    pub position: Point,
    pub height: f64,
    pub dimensions: Dimensions,
    pub selected: bool,
}

impl PoleInfo {
    fn from_pole(pole: &Pole) -> Self {
        Self {
            id: pole.id,
            profile_id: pole.profile.id.clone(),
            profile_name: pole.profile.name.clone(),
            kind: pole.profile.kind(),
            position: Point::new(pole.position.x.round(), pole.position.y.round()),
            height: pole.height,
            dimensions: pole.profile.dimensions(),
            selected: pole.selected,
        }
    }
}

/// Top-level editing session.
pub struct Editor {
    store: Shared<PoleStore>,
    catalog: ProfileCatalog,
    view_mode: ViewMode,
    grid: GridSettings,
    canvas: PlacementController,
    scene: SceneView,
}

impl Editor {
    pub fn new(options: EditorOptions) -> Self {
        Self::with_catalog(options, ProfileCatalog::default())
    }

    pub fn with_catalog(options: EditorOptions, catalog: ProfileCatalog) -> Self {
        let store = shared(PoleStore::with_default_height(options.default_height));
        let canvas = match options.surface {
            Some(surface) => PlacementController::with_surface(store.clone(), options.snap, surface),
            None => PlacementController::new(store.clone(), options.snap),
        };
        let scene = SceneView::new(store.clone(), options.bridge);
        Self {
            store,
            catalog,
            view_mode: options.initial_view,
            grid: options.grid,
            canvas,
            scene,
        }
    }

    pub fn store(&self) -> Shared<PoleStore> {
        self.store.clone()
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    pub fn canvas(&self) -> &PlacementController {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut PlacementController {
        &mut self.canvas
    }

    pub fn scene(&self) -> &SceneView {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneView {
        &mut self.scene
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Profile armed in the active view.
    pub fn active_profile(&self) -> Option<&Profile> {
        match self.view_mode {
            ViewMode::TwoD => self.canvas.active_profile(),
            ViewMode::ThreeD => self.scene.active_profile(),
        }
    }

    /// Switches the active view. An armed profile moves to the new view.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode == self.view_mode {
            return;
        }
        let armed = self.active_profile().cloned();
        self.canvas.clear_profile();
        self.scene.clear_profile();
        self.view_mode = mode;
        if let Some(profile) = armed {
            self.arm(profile);
        }
        info!(view = %mode, "View mode changed");
    }

    /// Arms the active view with the catalog profile `profile_id`.
    pub fn choose_profile(&mut self, profile_id: &str) -> Result<PlacementEvent, ProfileError> {
        let profile = self.catalog.resolve(profile_id).inspect_err(|err| {
            warn!(%err, "Cannot choose profile");
        })?;
        Ok(self.arm(profile))
    }

    fn arm(&mut self, profile: Profile) -> PlacementEvent {
        match self.view_mode {
            ViewMode::TwoD => self.canvas.choose_profile(profile),
            ViewMode::ThreeD => self.scene.choose_profile(profile),
        }
    }

    pub fn clear_profile(&mut self) -> Option<PlacementEvent> {
        match self.view_mode {
            ViewMode::TwoD => self.canvas.clear_profile(),
            ViewMode::ThreeD => self.scene.clear_profile(),
        }
    }

    /// Routes a pointer event to the 2D view.
    ///
    /// In 3D mode only `Resize` (the 2D surface still exists) and `Cancel`
    /// are honoured.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<PlacementEvent> {
        match (self.view_mode, event) {
            (ViewMode::TwoD, event) => self.canvas.handle(event),
            (ViewMode::ThreeD, event @ InputEvent::Resize { .. }) => self.canvas.handle(event),
            (ViewMode::ThreeD, InputEvent::Cancel) => self.scene.clear_profile(),
            (ViewMode::ThreeD, event) => {
                debug!(?event, "2D input ignored in 3D view");
                None
            }
        }
    }

    /// A click on the 3D ground plane. Ignored in 2D mode.
    pub fn click_ground(&mut self, hit: Point3<f64>) -> Option<PlacementEvent> {
        if self.view_mode != ViewMode::ThreeD {
            return None;
        }
        let event = self.scene.click_ground(hit);
        self.canvas.refresh();
        event
    }

    /// A click on a pole mesh in the 3D view. Ignored in 2D mode.
    pub fn click_pole(&mut self, id: PoleId) -> Option<PlacementEvent> {
        if self.view_mode != ViewMode::ThreeD {
            return None;
        }
        let event = self.scene.click_pole(id);
        self.canvas.refresh();
        event
    }

    pub fn select_pole(&mut self, id: PoleId) -> bool {
        let selected = self.store.borrow_mut().select_pole(id);
        self.canvas.refresh();
        selected
    }

    pub fn deselect_all(&mut self) {
        self.store.borrow_mut().deselect_all();
        self.canvas.refresh();
    }

    pub fn set_pole_height(&mut self, id: PoleId, height: f64) -> Result<bool, PoleError> {
        let result = self.store.borrow_mut().update_height(id, height);
        if let Err(err) = &result {
            warn!(%id, %err, "Height change rejected");
        }
        self.canvas.refresh();
        result
    }

    /// Gives the pole a fresh copy of catalog profile `profile_id`.
    pub fn set_pole_profile(&mut self, id: PoleId, profile_id: &str) -> Result<bool, ProfileError> {
        let profile = self.catalog.resolve(profile_id).inspect_err(|err| {
            warn!(%id, %err, "Profile change rejected");
        })?;
        let changed = self.store.borrow_mut().update_profile(id, profile);
        self.canvas.refresh();
        Ok(changed)
    }

    pub fn move_pole(&mut self, id: PoleId, position: Point) -> Result<bool, PoleError> {
        let result = self.store.borrow_mut().update_position(id, position);
        self.canvas.refresh();
        result
    }

    /// Deletes a pole after confirmation. Returns the removed pole.
    pub fn delete_pole(&mut self, id: PoleId, confirm: &mut impl Confirm) -> Option<Pole> {
        if !self.store.borrow().contains(id) {
            return None;
        }
        if !confirm.confirm(&format!("Delete {id}?")) {
            debug!(%id, "Delete declined");
            return None;
        }
        let removed = self.store.borrow_mut().delete_pole(id);
        self.canvas.refresh();
        removed
    }

    /// Deletes the selected pole after confirmation.
    pub fn delete_selected(&mut self, confirm: &mut impl Confirm) -> Option<Pole> {
        let id = self.store.borrow().selected_id()?;
        self.delete_pole(id, confirm)
    }

    /// Removes every pole after confirmation. Returns whether anything was removed.
    pub fn clear_all(&mut self, confirm: &mut impl Confirm) -> bool {
        let count = self.store.borrow().len();
        if count == 0 {
            return false;
        }
        if !confirm.confirm("Delete all poles?") {
            debug!("Clear all declined");
            return false;
        }
        self.store.borrow_mut().clear_all();
        self.canvas.refresh();
        info!(count, "Cleared all poles");
        true
    }

    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    /// Flips grid visibility and returns the new state.
    pub fn toggle_grid(&mut self) -> bool {
        self.grid.visible = !self.grid.visible;
        self.grid.visible
    }

    /// Flips grid snapping and returns the new state.
    pub fn toggle_snap_to_grid(&mut self) -> bool {
        self.grid.snap_to_grid = !self.grid.snap_to_grid;
        self.grid.snap_to_grid
    }

    pub fn set_grid_size(&mut self, size: f64) -> polekit_core::Result<()> {
        if !(size.is_finite() && size > 0.0) {
            return Err(Error::other(format!("Grid size must be > 0, got {size}")));
        }
        self.grid.size = size;
        Ok(())
    }

    pub fn pole_info(&self, id: PoleId) -> Option<PoleInfo> {
        self.store.borrow().get(id).map(PoleInfo::from_pole)
    }

    pub fn selected_info(&self) -> Option<PoleInfo> {
        self.store.borrow().selected().map(PoleInfo::from_pole)
    }

    /// All poles in store order.
    pub fn poles(&self) -> Vec<Pole> {
        self.store.borrow().iter().cloned().collect()
    }

    pub fn frame(&mut self) -> CanvasFrame {
        self.canvas.frame()
    }

    /// Renders the 2D view at its attached surface size.
    pub fn render(&mut self) -> Result<RgbImage, InputError> {
        let surface = self
            .canvas
            .viewport()
            .surface()
            .ok_or(InputError::SurfaceDetached)?;
        let frame = self.canvas.frame();
        Ok(render_canvas(
            &frame,
            &self.grid,
            surface.width.round() as u32,
            surface.height.round() as u32,
        ))
    }
}

//! 3D view model: an orbit camera plus pole placement on the ground plane.
//!
//! The scene never stores geometry of its own. Meshes are derived from the
//! shared pole store through the [`CoordinateBridge`] on every query, so a
//! pole placed in the 2D view shows up here immediately and vice versa.

use std::f64::consts::PI;
use std::rc::Rc;

use nalgebra::{Point3, Vector3};
use polekit_core::Shared;
use tracing::{debug, info};

use crate::bridge::CoordinateBridge;
use crate::model::{PoleId, PoleMesh, Profile};
use crate::placement::{CursorMode, PlacementEvent, PlacementState};
use crate::pole_store::PoleStore;
use crate::snap::SnapKind;

pub const MIN_CAMERA_DISTANCE: f64 = 3.0;
pub const MAX_CAMERA_DISTANCE: f64 = 25.0;
pub const MIN_POLAR_ANGLE: f64 = 0.1 * PI;
pub const MAX_POLAR_ANGLE: f64 = 0.8 * PI;

/// Camera target used when the scene is empty.
pub fn empty_scene_target() -> Point3<f64> {
    Point3::new(0.0, 2.0, 0.0)
}

/// Orbit camera around a target point, y up.
///
/// `polar` is measured from the +y axis, `azimuth` around it starting at +z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    target: Point3<f64>,
    distance: f64,
    azimuth: f64,
    polar: f64,
}

impl OrbitCamera {
    pub fn new(target: Point3<f64>, distance: f64, azimuth: f64, polar: f64) -> Self {
        let mut camera = Self {
            target,
            distance: 0.0,
            azimuth: 0.0,
            polar: 0.0,
        };
        camera.set_distance(distance);
        camera.azimuth = if azimuth.is_finite() { azimuth } else { 0.0 };
        camera.set_polar(polar);
        camera
    }

    pub fn target(&self) -> Point3<f64> {
        self.target
    }

    pub fn set_target(&mut self, target: Point3<f64>) {
        if target.iter().all(|c| c.is_finite()) {
            self.target = target;
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn polar(&self) -> f64 {
        self.polar
    }

    pub fn set_distance(&mut self, distance: f64) {
        if distance.is_finite() {
            self.distance = distance.clamp(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE);
        } else if self.distance == 0.0 {
            self.distance = MIN_CAMERA_DISTANCE;
        }
    }

    fn set_polar(&mut self, polar: f64) {
        if polar.is_finite() {
            self.polar = polar.clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE);
        } else if self.polar == 0.0 {
            self.polar = MIN_POLAR_ANGLE;
        }
    }

    /// Rotates around the target by the given angle deltas (radians).
    pub fn orbit(&mut self, delta_azimuth: f64, delta_polar: f64) {
        if delta_azimuth.is_finite() {
            self.azimuth = (self.azimuth + delta_azimuth).rem_euclid(2.0 * PI);
        }
        self.set_polar(self.polar + delta_polar);
    }

    /// Multiplies the distance to the target; `factor < 1` moves closer.
    pub fn dolly(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.set_distance(self.distance * factor);
        }
    }

    /// Camera position in scene space.
    pub fn eye(&self) -> Point3<f64> {
        let offset = Vector3::new(
            self.polar.sin() * self.azimuth.sin(),
            self.polar.cos(),
            self.polar.sin() * self.azimuth.cos(),
        ) * self.distance;
        self.target + offset
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(empty_scene_target(), 15.0, PI / 4.0, PI / 3.0)
    }
}

/// One pole as the 3D view draws it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePole {
    pub id: PoleId,
    pub centre: Point3<f64>,
    pub mesh: PoleMesh,
    pub selected: bool,
}

/// The 3D view bound to the shared pole store.
pub struct SceneView {
    store: Shared<PoleStore>,
    bridge: CoordinateBridge,
    camera: OrbitCamera,
    state: PlacementState,
}

impl SceneView {
    pub fn new(store: Shared<PoleStore>, bridge: CoordinateBridge) -> Self {
        Self {
            store,
            bridge,
            camera: OrbitCamera::default(),
            state: PlacementState::Idle,
        }
    }

    pub fn store(&self) -> Shared<PoleStore> {
        Rc::clone(&self.store)
    }

    pub fn bridge(&self) -> &CoordinateBridge {
        &self.bridge
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
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

    pub fn cursor(&self) -> CursorMode {
        if self.state.is_aiming() {
            CursorMode::Crosshair
        } else {
            CursorMode::Default
        }
    }

    pub fn choose_profile(&mut self, profile: Profile) -> PlacementEvent {
        info!(profile = %profile.id, "Profile chosen in 3D view");
        let profile_id = profile.id.clone();
        self.state = PlacementState::Aiming { profile };
        PlacementEvent::ProfileChosen { profile_id }
    }

    pub fn clear_profile(&mut self) -> Option<PlacementEvent> {
        if !self.state.is_aiming() {
            return None;
        }
        self.state = PlacementState::Idle;
        Some(PlacementEvent::ProfileCleared)
    }

    /// Handles a click that hit the ground plane at `hit` (scene space).
    ///
    /// While aiming, places a ground-standing pole under the hit and returns
    /// to idle. While idle, clears the selection.
    pub fn click_ground(&mut self, hit: Point3<f64>) -> Option<PlacementEvent> {
        if !hit.iter().all(|c| c.is_finite()) {
            return None;
        }
        let PlacementState::Aiming { profile } = &self.state else {
            self.store.borrow_mut().deselect_all();
            return Some(PlacementEvent::SelectionCleared);
        };
        let position = self.bridge.ground_hit_to_world(&hit);
        let id = self.store.borrow_mut().add_pole(profile.clone(), position);
        info!(%id, x = position.x, "Placed pole from 3D view");
        self.state = PlacementState::Idle;
        Some(PlacementEvent::PoleAdded {
            id,
            anchor: SnapKind::Ground,
            position,
        })
    }

    /// Handles a click on a pole mesh. Unknown ids are ignored.
    pub fn click_pole(&mut self, id: PoleId) -> Option<PlacementEvent> {
        if self.store.borrow_mut().select_pole(id) {
            Some(PlacementEvent::PoleSelected { id })
        } else {
            debug!(%id, "Click on unknown pole ignored");
            None
        }
    }

    /// Point the camera should look at: the mean of all pole centres at half height.
    pub fn camera_target(&self) -> Point3<f64> {
        let store = self.store.borrow();
        if store.is_empty() {
            return empty_scene_target();
        }
        let sum = store.iter().fold(Vector3::zeros(), |acc, pole| {
            acc + Vector3::new(self.bridge.to_scene_x(pole.position.x), pole.height / 2.0, 0.0)
        });
        Point3::from(sum / store.len() as f64)
    }

    /// Re-centres the camera on [`Self::camera_target`].
    pub fn focus_camera(&mut self) {
        let target = self.camera_target();
        self.camera.set_target(target);
    }

    /// Meshes for every pole, in store order.
    pub fn poles(&self) -> Vec<ScenePole> {
        self.store
            .borrow()
            .iter()
            .map(|pole| ScenePole {
                id: pole.id,
                centre: self.bridge.pole_centre(pole),
                mesh: pole.profile.shape.mesh(pole.height),
                selected: pole.selected,
            })
            .collect()
    }
}

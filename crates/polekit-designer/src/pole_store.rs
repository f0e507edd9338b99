use polekit_core::constants::DEFAULT_POLE_HEIGHT;
use polekit_core::PoleError;
use tracing::{debug, warn};

use crate::model::{Point, Pole, PoleId, Profile};

/// Owns the pole collection and is the only place poles are mutated.
///
/// `PoleStore` is responsible for:
/// - Allocating unique, never reused pole ids
/// - Keeping selection exclusive (at most one pole selected)
/// - Enforcing `height > 0` on every pole
/// - Counting revisions so views sharing the store can tell it changed
///
/// Commands addressed to an id that does not exist are no-ops and report
/// `false`; only values that would break an invariant produce an error.
#[derive(Debug, Clone)]
pub struct PoleStore {
    poles: Vec<Pole>,
    next_id: u64,
    selected_id: Option<PoleId>,
    revision: u64,
    default_height: f64,
}

impl PoleStore {
    /// Creates an empty store that gives new poles the standard 6 m height.
    pub fn new() -> Self {
        Self::with_default_height(DEFAULT_POLE_HEIGHT)
    }

    /// Creates an empty store with a custom height for new poles.
    ///
    /// Falls back to the standard height if `height` is not a positive number.
    pub fn with_default_height(height: f64) -> Self {
        let default_height = if height.is_finite() && height > 0.0 {
            height
        } else {
            warn!(height, "Ignoring invalid default pole height");
            DEFAULT_POLE_HEIGHT
        };
        Self {
            poles: Vec::new(),
            next_id: 1,
            selected_id: None,
            revision: 0,
            default_height,
        }
    }

    /// Height assigned to newly added poles.
    pub fn default_height(&self) -> f64 {
        self.default_height
    }

    /// Monotonic change counter, bumped by every mutation that changed state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Adds a pole. Always succeeds and allocates a fresh id.
    pub fn add_pole(&mut self, profile: Profile, position: Point) -> PoleId {
        let id = PoleId(self.next_id);
        self.next_id += 1;
        debug!(%id, profile = %profile.id, x = position.x, y = position.y, "Adding pole");
        self.poles
            .push(Pole::new(id, profile, position, self.default_height));
        self.touch();
        id
    }

    /// Selects `id` and deselects every other pole. Unknown ids are ignored.
    pub fn select_pole(&mut self, id: PoleId) -> bool {
        if !self.contains(id) {
            return false;
        }
        for pole in &mut self.poles {
            pole.selected = pole.id == id;
        }
        self.selected_id = Some(id);
        self.touch();
        true
    }

    /// Clears the selection flag on every pole.
    pub fn deselect_all(&mut self) {
        let had_selection = self.selected_id.is_some() || self.poles.iter().any(|p| p.selected);
        for pole in &mut self.poles {
            pole.selected = false;
        }
        self.selected_id = None;
        if had_selection {
            self.touch();
        }
    }

    /// Removes a pole. Returns the removed pole, or `None` for unknown ids.
    pub fn delete_pole(&mut self, id: PoleId) -> Option<Pole> {
        let index = self.poles.iter().position(|p| p.id == id)?;
        let pole = self.poles.remove(index);
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
        debug!(%id, "Deleted pole");
        self.touch();
        Some(pole)
    }

    /// Changes a pole's height. Rejects heights that are not finite and positive.
    pub fn update_height(&mut self, id: PoleId, height: f64) -> Result<bool, PoleError> {
        if !(height.is_finite() && height > 0.0) {
            return Err(PoleError::InvalidHeight { height });
        }
        let Some(pole) = self.poles.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        pole.height = height;
        self.touch();
        Ok(true)
    }

    /// Moves a pole. Rejects non-finite coordinates.
    pub fn update_position(&mut self, id: PoleId, position: Point) -> Result<bool, PoleError> {
        if !position.is_finite() {
            return Err(PoleError::InvalidPosition {
                x: position.x,
                y: position.y,
            });
        }
        let Some(pole) = self.poles.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        pole.position = position;
        self.touch();
        Ok(true)
    }

    /// Replaces a pole's profile with a copy of `profile`.
    pub fn update_profile(&mut self, id: PoleId, profile: Profile) -> bool {
        let Some(pole) = self.poles.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        pole.profile = profile;
        self.touch();
        true
    }

    /// Removes every pole and clears the selection.
    pub fn clear_all(&mut self) {
        if self.poles.is_empty() && self.selected_id.is_none() {
            return;
        }
        debug!(count = self.poles.len(), "Clearing all poles");
        self.poles.clear();
        self.selected_id = None;
        self.touch();
    }

    pub fn get(&self, id: PoleId) -> Option<&Pole> {
        self.poles.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PoleId) -> bool {
        self.get(id).is_some()
    }

    /// Poles in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Pole> {
        self.poles.iter()
    }

    pub fn len(&self) -> usize {
        self.poles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poles.is_empty()
    }

    pub fn selected_id(&self) -> Option<PoleId> {
        self.selected_id
    }

    pub fn selected(&self) -> Option<&Pole> {
        self.selected_id.and_then(|id| self.get(id))
    }
}

impl Default for PoleStore {
    fn default() -> Self {
        Self::new()
    }
}

use polekit_core::constants::POLE_HIT_HALF_WIDTH;
use tracing::debug;

use crate::model::{Point, PoleId};
use crate::pole_store::PoleStore;

/// Picks poles under the pointer in the 2D view.
///
/// Hit testing uses an axis-aligned box in world space: `±half_width` around
/// the pole's x, and vertically from the pole's top down to its base. The
/// first pole in store order whose box contains the point wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionManager {
    half_width: f64,
}

impl SelectionManager {
    /// Creates a manager with the standard ±10 world unit hit box.
    pub fn new() -> Self {
        Self::with_half_width(POLE_HIT_HALF_WIDTH)
    }

    pub fn with_half_width(half_width: f64) -> Self {
        Self { half_width }
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Returns the id of the first pole whose hit box contains `point`.
    pub fn hit_test(&self, store: &PoleStore, point: &Point, ground_y: f64) -> Option<PoleId> {
        store
            .iter()
            .find(|pole| pole.contains_point(point, ground_y, self.half_width))
            .map(|pole| pole.id)
    }

    /// Selects the pole under `point` exclusively, or clears the selection on a miss.
    ///
    /// Returns the newly selected pole's id, or `None` if nothing was hit.
    pub fn select_at(
        &self,
        store: &mut PoleStore,
        point: &Point,
        ground_y: f64,
    ) -> Option<PoleId> {
        match self.hit_test(store, point, ground_y) {
            Some(id) => {
                store.select_pole(id);
                debug!(%id, "Selected pole");
                Some(id)
            }
            None => {
                store.deselect_all();
                None
            }
        }
    }
}

impl Default for SelectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProfileCatalog;

    #[test]
    fn test_overlapping_poles_pick_first_in_store_order() {
        let catalog = ProfileCatalog::default();
        let mut store = PoleStore::new();
        let first = store.add_pole(catalog.resolve("circular").unwrap(), Point::new(100.0, 0.0));
        let second = store.add_pole(catalog.resolve("t-beam").unwrap(), Point::new(105.0, 0.0));

        let manager = SelectionManager::new();
        let ground_y = 750.0;
        assert_eq!(manager.hit_test(&store, &Point::new(103.0, 747.0), ground_y), Some(first));
        assert_eq!(manager.hit_test(&store, &Point::new(112.0, 747.0), ground_y), Some(second));
        assert_eq!(manager.hit_test(&store, &Point::new(103.0, 760.0), ground_y), None);
    }
}

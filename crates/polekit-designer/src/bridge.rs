//! The single mapping between 2D world space and 3D scene space.
//!
//! ```text
//! scene_x = (world_x - offset) / scale
//! scene_y = base height + height / 2     (metres in both views)
//! scene_z = 0                            (poles stand on one vertical plane)
//! ```
//!
//! Every conversion between the two views goes through [`CoordinateBridge`];
//! a pole placed from the 3D click plane and one placed from a 2D ground
//! anchor at the same world x must be stored identically.

use nalgebra::Point3;
use polekit_core::constants::{BRIDGE_OFFSET, BRIDGE_SCALE};
use polekit_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Point, Pole};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateBridge {
    offset: f64,
    scale: f64,
}

impl CoordinateBridge {
    /// The mapping both views use unless configured otherwise.
    pub const STANDARD: CoordinateBridge = CoordinateBridge {
        offset: BRIDGE_OFFSET,
        scale: BRIDGE_SCALE,
    };

    pub fn new(offset: f64, scale: f64) -> Result<Self> {
        if !offset.is_finite() {
            return Err(Error::other(format!("Bridge offset must be finite, got {offset}")));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::other(format!("Bridge scale must be > 0, got {scale}")));
        }
        Ok(Self { offset, scale })
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn to_scene_x(&self, world_x: f64) -> f64 {
        (world_x - self.offset) / self.scale
    }

    pub fn to_world_x(&self, scene_x: f64) -> f64 {
        scene_x * self.scale + self.offset
    }

    /// Centre of the pole's mesh in scene space.
    pub fn pole_centre(&self, pole: &Pole) -> Point3<f64> {
        Point3::new(
            self.to_scene_x(pole.position.x),
            pole.position.y + pole.height / 2.0,
            0.0,
        )
    }

    /// World position of a new ground-standing pole for a hit on the scene's ground plane.
    pub fn ground_hit_to_world(&self, hit: &Point3<f64>) -> Point {
        Point::new(self.to_world_x(hit.x), 0.0)
    }
}

impl Default for CoordinateBridge {
    fn default() -> Self {
        Self::STANDARD
    }
}

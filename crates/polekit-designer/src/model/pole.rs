use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Point, Profile};

/// Identity of a placed pole. Allocated by the pole store, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoleId(pub u64);

impl fmt::Display for PoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pole-{}", self.0)
    }
}

/// A vertical pole placed in the scene.
///
/// `position.x` is the horizontal world offset; `position.y` is the height of
/// the pole's base above the ground, non-zero when stacked on another pole.
/// The pole owns a copy of its profile, so later catalog edits never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pole {
    pub id: PoleId,
    pub profile: Profile,
    pub position: Point,
    pub height: f64,
    #[serde(skip)]
    pub selected: bool,
}

impl Pole {
    pub fn new(id: PoleId, profile: Profile, position: Point, height: f64) -> Self {
        Self {
            id,
            profile,
            position,
            height,
            selected: false,
        }
    }

    /// World y of the pole's base, given the world y of the ground line.
    pub fn base_y(&self, ground_y: f64) -> f64 {
        ground_y - self.position.y
    }

    /// World y of the pole's top, given the world y of the ground line.
    pub fn top_y(&self, ground_y: f64) -> f64 {
        ground_y - self.height - self.position.y
    }

    /// Axis-aligned hit test in world space.
    pub fn contains_point(&self, point: &Point, ground_y: f64, half_width: f64) -> bool {
        point.x >= self.position.x - half_width
            && point.x <= self.position.x + half_width
            && point.y >= self.top_y(ground_y)
            && point.y <= self.base_y(ground_y)
    }
}

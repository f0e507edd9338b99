//! The fixed, ordered list of profiles a user can place.

use polekit_core::ProfileError;

use crate::model::{Profile, ProfileShape};

/// Read-only profile catalog. Order is the order shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
}

impl ProfileCatalog {
    /// Builds a catalog from explicit entries, rejecting bad dimensions.
    pub fn new(profiles: Vec<Profile>) -> Result<Self, ProfileError> {
        for profile in &profiles {
            if let Some((dimension, value)) = profile.shape.invalid_dimension() {
                return Err(ProfileError::InvalidDimension {
                    id: profile.id.clone(),
                    dimension: dimension.to_string(),
                    value,
                });
            }
        }
        Ok(Self { profiles })
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Looks up a profile and returns an owned copy for a pole to keep.
    pub fn resolve(&self, id: &str) -> Result<Profile, ProfileError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| ProfileError::UnknownProfile { id: id.to_string() })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self {
            profiles: vec![
                Profile::new(
                    "circular",
                    "Circular",
                    ProfileShape::Circular {
                        diameter: Some(0.3),
                        thickness: Some(0.01),
                    },
                ),
                Profile::new(
                    "rectangular",
                    "Rectangular",
                    ProfileShape::Rectangular {
                        width: Some(0.3),
                        height: Some(0.4),
                        thickness: Some(0.01),
                    },
                ),
                Profile::new(
                    "i-beam",
                    "I-Beam",
                    ProfileShape::IBeam {
                        width: Some(0.2),
                        height: Some(0.4),
                        thickness: Some(0.01),
                    },
                ),
                Profile::new(
                    "t-beam",
                    "T-Beam",
                    ProfileShape::TBeam {
                        width: Some(0.3),
                        height: Some(0.3),
                        thickness: Some(0.01),
                    },
                ),
            ],
        }
    }
}

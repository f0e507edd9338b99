//! Structural profiles (cross-sections) a pole can be built from.
//!
//! Every consumer that cares about the profile kind matches on
//! [`ProfileShape`] exhaustively, so adding a kind is a compile error at each
//! site that has to handle it.

use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_THICKNESS: f64 = 0.01;
const CYLINDER_SEGMENTS: u32 = 16;

/// The four supported profile families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    Circular,
    Rectangular,
    IBeam,
    TBeam,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circular => write!(f, "circular"),
            Self::Rectangular => write!(f, "rectangular"),
            Self::IBeam => write!(f, "i-beam"),
            Self::TBeam => write!(f, "t-beam"),
        }
    }
}

/// Cross-section dimensions in metres. Unset values fall back to per-kind defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProfileShape {
    Circular {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diameter: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thickness: Option<f64>,
    },
    Rectangular {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thickness: Option<f64>,
    },
    IBeam {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thickness: Option<f64>,
    },
    TBeam {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thickness: Option<f64>,
    },
}

/// Resolved cross-section. For circular profiles `width == height == diameter`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
}

/// Geometry used to draw a pole in the 3D scene, in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoleMesh {
    Cylinder {
        radius: f64,
        height: f64,
        radial_segments: u32,
    },
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
}

impl ProfileShape {
    pub fn kind(&self) -> ProfileKind {
        match self {
            Self::Circular { .. } => ProfileKind::Circular,
            Self::Rectangular { .. } => ProfileKind::Rectangular,
            Self::IBeam { .. } => ProfileKind::IBeam,
            Self::TBeam { .. } => ProfileKind::TBeam,
        }
    }

    /// Dimensions with the per-kind defaults applied.
    pub fn dimensions(&self) -> Dimensions {
        match *self {
            Self::Circular {
                diameter,
                thickness,
            } => {
                let d = diameter.unwrap_or(0.3);
                Dimensions {
                    width: d,
                    height: d,
                    thickness: thickness.unwrap_or(DEFAULT_THICKNESS),
                    diameter: Some(d),
                }
            }
            Self::Rectangular {
                width,
                height,
                thickness,
            } => Dimensions {
                width: width.unwrap_or(0.3),
                height: height.unwrap_or(0.4),
                thickness: thickness.unwrap_or(DEFAULT_THICKNESS),
                diameter: None,
            },
            Self::IBeam {
                width,
                height,
                thickness,
            } => Dimensions {
                width: width.unwrap_or(0.2),
                height: height.unwrap_or(0.4),
                thickness: thickness.unwrap_or(DEFAULT_THICKNESS),
                diameter: None,
            },
            Self::TBeam {
                width,
                height,
                thickness,
            } => Dimensions {
                width: width.unwrap_or(0.3),
                height: height.unwrap_or(0.3),
                thickness: thickness.unwrap_or(DEFAULT_THICKNESS),
                diameter: None,
            },
        }
    }

    /// Stroke width of the pole in the 2D schematic, never thinner than 2 px.
    pub fn stroke_width(&self, pixels_per_metre: f64) -> f64 {
        let dims = self.dimensions();
        let governing = match self {
            Self::Circular { .. } => dims.width,
            Self::Rectangular { .. } => dims.width.max(dims.height),
            Self::IBeam { .. } | Self::TBeam { .. } => dims.width,
        };
        (governing * pixels_per_metre / 10.0).max(2.0)
    }

    /// 3D geometry for a pole of `pole_height` metres.
    pub fn mesh(&self, pole_height: f64) -> PoleMesh {
        let dims = self.dimensions();
        match self {
            Self::Circular { .. } => PoleMesh::Cylinder {
                radius: dims.width / 2.0,
                height: pole_height,
                radial_segments: CYLINDER_SEGMENTS,
            },
            Self::Rectangular { .. } | Self::IBeam { .. } | Self::TBeam { .. } => PoleMesh::Box {
                width: dims.width,
                height: pole_height,
                depth: dims.height,
            },
        }
    }

    /// Returns the first set dimension that is not a finite positive number.
    pub fn invalid_dimension(&self) -> Option<(&'static str, f64)> {
        let fields: Vec<(&'static str, Option<f64>)> = match *self {
            Self::Circular {
                diameter,
                thickness,
            } => vec![("diameter", diameter), ("thickness", thickness)],
            Self::Rectangular {
                width,
                height,
                thickness,
            }
            | Self::IBeam {
                width,
                height,
                thickness,
            }
            | Self::TBeam {
                width,
                height,
                thickness,
            } => vec![("width", width), ("height", height), ("thickness", thickness)],
        };
        fields.into_iter().find_map(|(name, value)| match value {
            Some(v) if !(v.is_finite() && v > 0.0) => Some((name, v)),
            _ => None,
        })
    }
}

/// A named catalog entry. Poles store their own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub shape: ProfileShape,
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, shape: ProfileShape) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            shape,
        }
    }

    pub fn kind(&self) -> ProfileKind {
        self.shape.kind()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.shape.dimensions()
    }
}

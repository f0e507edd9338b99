//! Pointer, wheel and window events as delivered by the host input system.

use serde::{Deserialize, Serialize};

use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Keyboard modifiers held while a pointer event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// One input event. Positions are screen pixels relative to the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        pos: Point,
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        pos: Point,
    },
    PointerUp {
        pos: Point,
        button: PointerButton,
    },
    Click {
        pos: Point,
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Wheel {
        pos: Point,
        delta_y: f64,
    },
    Resize {
        width: f64,
        height: f64,
    },
    /// Escape or an equivalent host gesture.
    Cancel,
}

/// Whether a pointer-down with this button and these modifiers starts a pan.
pub fn starts_pan(button: PointerButton, modifiers: Modifiers) -> bool {
    match button {
        PointerButton::Middle => true,
        PointerButton::Primary => modifiers.ctrl,
        PointerButton::Secondary => false,
    }
}

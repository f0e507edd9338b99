//! Scripted editing sessions.
//!
//! A session file is JSON: `{ "steps": [ ... ] }`, each step tagged with
//! `"step"`. Pointer input uses the same event shapes the 2D view receives:
//!
//! ```json
//! { "steps": [
//!     { "step": "input", "event": { "type": "resize", "width": 1200, "height": 800 } },
//!     { "step": "choose_profile", "profile": "circular" },
//!     { "step": "input", "event": { "type": "click", "pos": { "x": 200, "y": 748 },
//!                                   "button": "primary" } }
//! ] }
//! ```

use std::path::Path;

use anyhow::Context;
use nalgebra::Point3;
use polekit_designer::{Confirm, Editor, InputEvent, PlacementEvent, Point, PoleId, ViewMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SessionStep {
    ChooseProfile { profile: String },
    ClearProfile,
    SetView { view: ViewMode },
    Input { event: InputEvent },
    ZoomIn,
    ZoomOut,
    ResetView,
    SelectPole { id: PoleId },
    DeselectAll,
    SetHeight { id: PoleId, height: f64 },
    SetProfile { id: PoleId, profile: String },
    MovePole { id: PoleId, x: f64, y: f64 },
    Delete { id: PoleId },
    DeleteSelected,
    ClearAll,
    /// Click on the 3D ground plane at scene coordinates.
    ClickGround {
        x: f64,
        #[serde(default)]
        z: f64,
    },
    ClickPole { id: PoleId },
    ToggleGrid,
    ToggleSnapToGrid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub steps: Vec<SessionStep>,
}

/// What a replay did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionReport {
    pub events: Vec<PlacementEvent>,
    /// Steps refused because of an invalid value (bad height, unknown profile, ...).
    pub rejected: usize,
}

impl Session {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid session file {}", path.display()))
    }

    /// Applies every step in order. Invalid values are logged and skipped.
    pub fn replay(&self, editor: &mut Editor, confirm: &mut impl Confirm) -> SessionReport {
        let mut report = SessionReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            debug!(index, ?step, "Replaying step");
            match apply(editor, step, confirm) {
                Ok(Some(event)) => report.events.push(event),
                Ok(None) => {}
                Err(err) => {
                    warn!(index, %err, "Step rejected");
                    report.rejected += 1;
                }
            }
        }
        info!(
            steps = self.steps.len(),
            events = report.events.len(),
            rejected = report.rejected,
            "Session replayed"
        );
        report
    }
}

fn apply(
    editor: &mut Editor,
    step: &SessionStep,
    confirm: &mut impl Confirm,
) -> anyhow::Result<Option<PlacementEvent>> {
    let event = match step {
        SessionStep::ChooseProfile { profile } => Some(editor.choose_profile(profile)?),
        SessionStep::ClearProfile => editor.clear_profile(),
        SessionStep::SetView { view } => {
            editor.set_view_mode(*view);
            None
        }
        SessionStep::Input { event } => editor.handle_input(*event),
        SessionStep::ZoomIn => Some(editor.canvas_mut().zoom_in()),
        SessionStep::ZoomOut => Some(editor.canvas_mut().zoom_out()),
        SessionStep::ResetView => Some(editor.canvas_mut().reset_view()),
        SessionStep::SelectPole { id } => editor
            .select_pole(*id)
            .then_some(PlacementEvent::PoleSelected { id: *id }),
        SessionStep::DeselectAll => {
            editor.deselect_all();
            Some(PlacementEvent::SelectionCleared)
        }
        SessionStep::SetHeight { id, height } => {
            editor.set_pole_height(*id, *height)?;
            None
        }
        SessionStep::SetProfile { id, profile } => {
            editor.set_pole_profile(*id, profile)?;
            None
        }
        SessionStep::MovePole { id, x, y } => {
            editor.move_pole(*id, Point::new(*x, *y))?;
            None
        }
        SessionStep::Delete { id } => {
            editor.delete_pole(*id, confirm);
            None
        }
        SessionStep::DeleteSelected => {
            editor.delete_selected(confirm);
            None
        }
        SessionStep::ClearAll => {
            editor.clear_all(confirm);
            None
        }
        SessionStep::ClickGround { x, z } => editor.click_ground(Point3::new(*x, 0.0, *z)),
        SessionStep::ClickPole { id } => editor.click_pole(*id),
        SessionStep::ToggleGrid => {
            editor.toggle_grid();
            None
        }
        SessionStep::ToggleSnapToGrid => {
            editor.toggle_snap_to_grid();
            None
        }
    };
    Ok(event)
}

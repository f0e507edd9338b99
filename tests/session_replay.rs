//! Session scripts replayed against a fresh editor

use polekit::{Editor, EditorOptions, Point, Session, SessionStep, ViewMode};
use polekit_designer::SurfaceSize;

fn editor() -> Editor {
    Editor::new(EditorOptions {
        surface: Some(SurfaceSize {
            width: 1200.0,
            height: 800.0,
        }),
        ..EditorOptions::default()
    })
}

const SCRIPT: &str = r#"{
  "steps": [
    { "step": "choose_profile", "profile": "circular" },
    { "step": "input", "event": { "type": "click", "pos": { "x": 202, "y": 748 }, "button": "primary" } },
    { "step": "choose_profile", "profile": "i-beam" },
    { "step": "input", "event": { "type": "click", "pos": { "x": 200, "y": 744 }, "button": "primary" } },
    { "step": "set_height", "id": 1, "height": -3 },
    { "step": "choose_profile", "profile": "h-beam" },
    { "step": "set_view", "view": "3d" },
    { "step": "choose_profile", "profile": "t-beam" },
    { "step": "click_ground", "x": 3.0 }
  ]
}"#;

#[test]
fn test_replay_places_stacked_and_3d_poles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, SCRIPT).unwrap();

    let session = Session::load(&path).unwrap();
    let mut editor = editor();
    let report = session.replay(&mut editor, &mut |_: &str| true);

    assert_eq!(report.rejected, 2);
    let poles = editor.poles();
    assert_eq!(poles.len(), 3);
    assert_eq!(poles[0].position, Point::new(200.0, 0.0));
    assert_eq!(poles[1].position, Point::new(200.0, 6.0));
    assert_eq!(poles[1].profile.id, "i-beam");
    assert_eq!(poles[2].position, Point::new(700.0, 0.0));
    assert_eq!(editor.view_mode(), ViewMode::ThreeD);
}

#[test]
fn test_declined_clear_all_keeps_poles() {
    let session = Session {
        steps: vec![
            SessionStep::ChooseProfile {
                profile: "circular".into(),
            },
            SessionStep::Input {
                event: polekit::InputEvent::Click {
                    pos: Point::new(100.0, 750.0),
                    button: polekit_designer::PointerButton::Primary,
                    modifiers: Default::default(),
                },
            },
            SessionStep::ClearAll,
        ],
    };

    let mut editor = editor();
    session.replay(&mut editor, &mut |_: &str| false);
    assert_eq!(editor.poles().len(), 1);

    session.replay(&mut editor, &mut |_: &str| true);
    assert!(editor.poles().is_empty());
}

#[test]
fn test_missing_session_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Session::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read session file"));
}

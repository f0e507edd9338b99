//! Error display and conversion tests

use polekit_core::{Error, InputError, PoleError, ProfileError};

#[test]
fn test_pole_error_display() {
    let err = PoleError::InvalidHeight { height: -1.0 };
    assert_eq!(
        err.to_string(),
        "Invalid pole height -1: must be a finite value > 0"
    );

    let err = PoleError::InvalidPosition { x: f64::NAN, y: 3.0 };
    assert_eq!(err.to_string(), "Invalid pole position (NaN, 3)");
}

#[test]
fn test_profile_error_display() {
    let err = ProfileError::UnknownProfile {
        id: "z-beam".to_string(),
    };
    assert_eq!(err.to_string(), "Unknown profile: z-beam");
}

#[test]
fn test_input_error_display() {
    assert_eq!(
        InputError::SurfaceDetached.to_string(),
        "Render surface not attached"
    );
    let err = InputError::InvalidSurface {
        width: 0.0,
        height: 600.0,
    };
    assert_eq!(err.to_string(), "Invalid surface size 0x600");
}

#[test]
fn test_error_conversion() {
    let err: Error = PoleError::InvalidHeight { height: 0.0 }.into();
    assert!(matches!(err, Error::Pole(PoleError::InvalidHeight { .. })));

    let err: Error = ProfileError::UnknownProfile {
        id: "x".to_string(),
    }
    .into();
    assert!(matches!(err, Error::Profile(_)));

    let err: Error = InputError::SurfaceDetached.into();
    assert!(matches!(err, Error::Input(InputError::SurfaceDetached)));
    assert_eq!(err.to_string(), "Render surface not attached");

    let err = Error::other("something odd");
    assert_eq!(err.to_string(), "something odd");
}

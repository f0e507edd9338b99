//! Integration tests for the pole store commands

use polekit_core::PoleError;
use polekit_designer::{Point, PoleId, PoleStore, Profile, ProfileCatalog};

fn profile(id: &str) -> Profile {
    ProfileCatalog::default().resolve(id).unwrap()
}

#[test]
fn test_add_allocates_fresh_ids_with_default_height() {
    let mut store = PoleStore::new();
    let a = store.add_pole(profile("circular"), Point::new(100.0, 0.0));
    let b = store.add_pole(profile("i-beam"), Point::new(200.0, 0.0));
    assert_ne!(a, b);
    assert_eq!(a.to_string(), "pole-1");
    assert_eq!(store.len(), 2);
    let pole = store.get(a).unwrap();
    assert_eq!(pole.height, 6.0);
    assert!(!pole.selected);
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let mut store = PoleStore::new();
    let a = store.add_pole(profile("circular"), Point::ORIGIN);
    store.delete_pole(a);
    let b = store.add_pole(profile("circular"), Point::ORIGIN);
    assert_ne!(a, b);
}

#[test]
fn test_selection_is_exclusive() {
    let mut store = PoleStore::new();
    let a = store.add_pole(profile("circular"), Point::ORIGIN);
    let b = store.add_pole(profile("circular"), Point::new(50.0, 0.0));
    assert!(store.select_pole(a));
    assert!(store.select_pole(b));
    assert_eq!(store.selected_id(), Some(b));
    assert_eq!(store.iter().filter(|p| p.selected).count(), 1);

    store.deselect_all();
    assert_eq!(store.selected_id(), None);
    assert!(store.iter().all(|p| !p.selected));
}

#[test]
fn test_commands_on_missing_ids_are_no_ops() {
    let mut store = PoleStore::new();
    let a = store.add_pole(profile("circular"), Point::ORIGIN);
    store.select_pole(a);
    let revision = store.revision();

    let ghost = PoleId(99);
    assert!(!store.select_pole(ghost));
    assert!(store.delete_pole(ghost).is_none());
    assert_eq!(store.update_height(ghost, 3.0), Ok(false));
    assert!(!store.update_profile(ghost, profile("t-beam")));

    assert_eq!(store.selected_id(), Some(a));
    assert_eq!(store.revision(), revision);
}

#[test]
fn test_invalid_height_is_rejected_and_pole_untouched() {
    let mut store = PoleStore::new();
    let a = store.add_pole(profile("circular"), Point::ORIGIN);
    for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        let err = store.update_height(a, bad).unwrap_err();
        assert!(matches!(err, PoleError::InvalidHeight { .. }));
    }
    assert_eq!(store.get(a).unwrap().height, 6.0);
    assert_eq!(store.update_height(a, 8.5), Ok(true));
    assert_eq!(store.get(a).unwrap().height, 8.5);
}

#[test]
fn test_deleting_selected_pole_clears_selection() {
    let mut store = PoleStore::new();
    let a = store.add_pole(profile("circular"), Point::ORIGIN);
    store.select_pole(a);
    let removed = store.delete_pole(a).unwrap();
    assert_eq!(removed.id, a);
    assert_eq!(store.selected_id(), None);
    assert!(store.selected().is_none());
}

#[test]
fn test_profile_update_stores_a_copy() {
    let mut store = PoleStore::new();
    let a = store.add_pole(profile("circular"), Point::ORIGIN);
    let mut replacement = profile("rectangular");
    assert!(store.update_profile(a, replacement.clone()));
    replacement.name = "Edited".to_string();
    assert_eq!(store.get(a).unwrap().profile.name, "Rectangular");
}

#[test]
fn test_clear_all_and_revision() {
    let mut store = PoleStore::new();
    assert_eq!(store.revision(), 0);
    store.clear_all();
    assert_eq!(store.revision(), 0);

    store.add_pole(profile("circular"), Point::ORIGIN);
    store.add_pole(profile("circular"), Point::new(50.0, 0.0));
    let before = store.revision();
    store.clear_all();
    assert!(store.is_empty());
    assert!(store.revision() > before);
}

#[test]
fn test_update_position_rejects_non_finite() {
    let mut store = PoleStore::new();
    let a = store.add_pole(profile("circular"), Point::ORIGIN);
    assert!(store.update_position(a, Point::new(f64::NAN, 0.0)).is_err());
    assert_eq!(store.update_position(a, Point::new(150.0, 2.0)), Ok(true));
    assert_eq!(store.get(a).unwrap().position, Point::new(150.0, 2.0));
}

#[test]
fn test_invalid_default_height_falls_back() {
    assert_eq!(PoleStore::with_default_height(-1.0).default_height(), 6.0);
    assert_eq!(PoleStore::with_default_height(4.0).default_height(), 4.0);
}

//! `DirStore` against a real directory.

use mergetui::prefs::{KEY_BEST, KEY_SOUND, KEY_THEME, Preferences, Profile, ThemeName};
use mergetui::storage::{DirStore, Store};
use std::fs;

#[test]
fn missing_keys_read_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirStore::new(dir.path().join("nested"));
    assert_eq!(store.get(KEY_BEST).unwrap(), None);
}

#[test]
fn values_are_plain_text_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirStore::new(dir.path().join("mergetui"));
    store.set(KEY_BEST, "512").unwrap();
    let raw = fs::read_to_string(dir.path().join("mergetui").join(KEY_BEST)).unwrap();
    assert_eq!(raw, "512");
    assert_eq!(store.get(KEY_BEST).unwrap().as_deref(), Some("512"));
}

#[test]
fn trailing_newline_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(KEY_THEME), "contrast\n").unwrap();
    let store = DirStore::new(dir.path());
    let prefs = Preferences::load(&store).unwrap();
    assert_eq!(prefs.theme, ThemeName::Contrast);
}

#[test]
fn profile_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut profile = Profile::open(DirStore::new(dir.path()));
        profile.record_best(1024);
        profile.toggle_theme();
        profile.toggle_sound();
    }
    let profile = Profile::open(DirStore::new(dir.path()));
    assert_eq!(profile.prefs().best_score, 1024);
    assert_eq!(profile.prefs().theme, ThemeName::Contrast);
    assert!(profile.prefs().sound_enabled);
    assert_eq!(
        fs::read_to_string(dir.path().join(KEY_SOUND)).unwrap(),
        "1"
    );
}

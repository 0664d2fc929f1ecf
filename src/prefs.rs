//! Persisted preferences: best score, theme and sound, over a [`Store`].

use crate::storage::{Store, StoreError};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub const KEY_BEST: &str = "game2048_best_score";
pub const KEY_THEME: &str = "game2048_theme";
pub const KEY_SOUND: &str = "game2048_sound_enabled";

/// The two known theme tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Neumorph,
    Contrast,
}

impl ThemeName {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Neumorph => "neumorph",
            Self::Contrast => "contrast",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Neumorph => Self::Contrast,
            Self::Contrast => Self::Neumorph,
        }
    }

    /// Label shown in the HUD.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Neumorph => "Soft",
            Self::Contrast => "Contrast",
        }
    }
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neumorph" => Ok(Self::Neumorph),
            "contrast" => Ok(Self::Contrast),
            other => Err(format!("unknown theme {other:?}")),
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub best_score: u32,
    pub theme: ThemeName,
    pub sound_enabled: bool,
}

impl Preferences {
    /// Read all three keys. Missing or malformed values keep their defaults
    /// (best 0, neumorph, sound off).
    pub fn load(store: &dyn Store) -> Result<Self, StoreError> {
        let mut prefs = Self::default();
        if let Some(best) = store.get(KEY_BEST)?.and_then(|s| s.trim().parse::<u32>().ok()) {
            prefs.best_score = best;
        }
        if let Some(theme) = store.get(KEY_THEME)?.and_then(|s| s.parse().ok()) {
            prefs.theme = theme;
        }
        prefs.sound_enabled = store.get(KEY_SOUND)?.as_deref() == Some("1");
        Ok(prefs)
    }
}

/// Preferences plus the store they live in. Every change is written through.
#[derive(Debug)]
pub struct Profile<S> {
    store: S,
    prefs: Preferences,
}

impl<S: Store> Profile<S> {
    /// Load from `store`. A store that cannot be read yields defaults.
    pub fn open(store: S) -> Self {
        let prefs = Preferences::load(&store).unwrap_or_else(|e| {
            warn!(error = %e, "could not read preferences, using defaults");
            Preferences::default()
        });
        Self { store, prefs }
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record `score` if it beats the stored best. Returns whether it did.
    pub fn record_best(&mut self, score: u32) -> bool {
        if score <= self.prefs.best_score {
            return false;
        }
        self.prefs.best_score = score;
        self.write(KEY_BEST, &score.to_string());
        true
    }

    pub fn set_theme(&mut self, theme: ThemeName) {
        self.prefs.theme = theme;
        self.write(KEY_THEME, theme.token());
    }

    pub fn toggle_theme(&mut self) -> ThemeName {
        let theme = self.prefs.theme.toggled();
        self.set_theme(theme);
        theme
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.prefs.sound_enabled = !self.prefs.sound_enabled;
        let token = if self.prefs.sound_enabled { "1" } else { "0" };
        self.write(KEY_SOUND, token);
        self.prefs.sound_enabled
    }

    /// Change sound for this run only (e.g. `--mute`); nothing is written.
    pub fn override_sound(&mut self, enabled: bool) {
        self.prefs.sound_enabled = enabled;
    }

    /// Change theme for this run only; nothing is written.
    pub fn override_theme(&mut self, theme: ThemeName) {
        self.prefs.theme = theme;
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "could not persist preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn defaults_when_store_is_empty() {
        let profile = Profile::open(MemoryStore::new());
        assert_eq!(*profile.prefs(), Preferences::default());
        assert!(!profile.prefs().sound_enabled);
        assert_eq!(profile.prefs().theme, ThemeName::Neumorph);
    }

    #[test]
    fn malformed_values_are_ignored() {
        let mut store = MemoryStore::new();
        store.set(KEY_BEST, "-5").unwrap();
        store.set(KEY_THEME, "dark").unwrap();
        store.set(KEY_SOUND, "yes").unwrap();
        let prefs = Preferences::load(&store).unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn loads_stored_tokens() {
        let mut store = MemoryStore::new();
        store.set(KEY_BEST, "2048").unwrap();
        store.set(KEY_THEME, "contrast").unwrap();
        store.set(KEY_SOUND, "1").unwrap();
        let prefs = Preferences::load(&store).unwrap();
        assert_eq!(prefs.best_score, 2048);
        assert_eq!(prefs.theme, ThemeName::Contrast);
        assert!(prefs.sound_enabled);
    }

    #[test]
    fn best_only_written_when_it_increases() {
        let mut profile = Profile::open(MemoryStore::new());
        assert!(profile.record_best(100));
        assert!(!profile.record_best(50));
        assert_eq!(profile.store().get(KEY_BEST).unwrap().as_deref(), Some("100"));
    }

    #[test]
    fn toggles_write_tokens() {
        let mut profile = Profile::open(MemoryStore::new());
        assert_eq!(profile.toggle_theme(), ThemeName::Contrast);
        assert!(profile.toggle_sound());
        assert_eq!(profile.store().get(KEY_THEME).unwrap().as_deref(), Some("contrast"));
        assert_eq!(profile.store().get(KEY_SOUND).unwrap().as_deref(), Some("1"));
        assert!(!profile.toggle_sound());
        assert_eq!(profile.store().get(KEY_SOUND).unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn overrides_are_not_persisted() {
        let mut profile = Profile::open(MemoryStore::new());
        profile.override_sound(true);
        profile.override_theme(ThemeName::Contrast);
        assert!(profile.prefs().sound_enabled);
        assert_eq!(profile.store().get(KEY_SOUND).unwrap(), None);
        assert_eq!(profile.store().get(KEY_THEME).unwrap(), None);
    }
}

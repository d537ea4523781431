//! crates/najm_core/src/stores/preferences.rs
//!
//! Persists the two independent display preferences: language and colour theme.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{Language, Theme};
use crate::ports::{DisplayHost, KeyValueStore, PortResult};
use crate::records::{LANGUAGE_KEY, THEME_KEY};

pub struct PreferenceStore {
    storage: Arc<dyn KeyValueStore>,
    host: Arc<dyn DisplayHost>,
}

impl PreferenceStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, host: Arc<dyn DisplayHost>) -> Self {
        Self { storage, host }
    }

    /// Reads a stored scalar, treating unreadable or unknown values as absent.
    fn read<T: std::str::FromStr<Err = String>>(&self, key: &str) -> Option<T> {
        match self.storage.get(key) {
            Ok(Some(raw)) => match raw.parse::<T>() {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring stored '{}' preference: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read '{}' preference: {}", key, e);
                None
            }
        }
    }

    pub fn language(&self) -> Language {
        self.read::<Language>(LANGUAGE_KEY).unwrap_or_default()
    }

    pub fn set_language(&self, language: Language) -> PortResult<()> {
        self.storage.set(LANGUAGE_KEY, language.as_tag())?;
        debug!("Language set to {}", language);
        Ok(())
    }

    pub fn toggle_language(&self) -> PortResult<Language> {
        let next = self.language().toggled();
        self.set_language(next)?;
        Ok(next)
    }

    /// Returns the stored theme. With nothing stored, the host's colour-scheme hint
    /// decides, and that choice is written back so later reads no longer consult it.
    pub fn theme(&self) -> Theme {
        if let Some(theme) = self.read::<Theme>(THEME_KEY) {
            return theme;
        }
        let derived = if self.host.prefers_dark_scheme() {
            Theme::Dark
        } else {
            Theme::Light
        };
        if let Err(e) = self.storage.set(THEME_KEY, derived.as_str()) {
            warn!("Could not persist derived theme: {}", e);
        }
        derived
    }

    /// Writes the theme through to storage and applies the presentation flag in the
    /// same call. A failed write leaves both the stored value and the flag untouched.
    pub fn set_theme(&self, theme: Theme) -> PortResult<()> {
        self.storage.set(THEME_KEY, theme.as_str())?;
        self.host.apply_theme(theme);
        debug!("Theme set to {}", theme);
        Ok(())
    }

    pub fn toggle_theme(&self) -> PortResult<Theme> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Re-applies the current theme flag, e.g. on boot.
    pub fn apply_current_theme(&self) -> Theme {
        let theme = self.theme();
        self.host.apply_theme(theme);
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::stores::testing::{FailingStore, RecordingHost};

    fn store_with(storage: Arc<dyn KeyValueStore>, prefers_dark: bool) -> (PreferenceStore, Arc<RecordingHost>) {
        let host = Arc::new(RecordingHost::new(prefers_dark));
        (PreferenceStore::new(storage, host.clone()), host)
    }

    #[test]
    fn theme_defaults_from_host_hint_then_sticks() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (prefs, _) = store_with(storage.clone(), true);
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        // A host that now prefers light no longer matters.
        let (prefs, _) = store_with(storage, false);
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn set_theme_survives_reload_and_applies_flag() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (prefs, host) = store_with(storage.clone(), false);
        prefs.set_theme(Theme::Dark).unwrap();
        assert_eq!(host.applied(), vec![Theme::Dark]);

        let (reloaded, _) = store_with(storage, false);
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn failed_write_does_not_flip_flag() {
        let (prefs, host) = store_with(Arc::new(FailingStore), false);
        assert!(prefs.set_theme(Theme::Dark).is_err());
        assert!(host.applied().is_empty());
        // Unreadable storage falls back to the derived default.
        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn language_defaults_to_arabic_and_toggles() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        storage.set(LANGUAGE_KEY, "klingon").unwrap();
        let (prefs, _) = store_with(storage, false);
        assert_eq!(prefs.language(), Language::Ar);
        assert_eq!(prefs.toggle_language().unwrap(), Language::En);
        assert_eq!(prefs.language(), Language::En);
    }
}

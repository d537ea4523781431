//! Test doubles shared by the store and coordinator tests.

use std::sync::Mutex;

use crate::domain::Theme;
use crate::ports::{DisplayHost, KeyValueStore, PortError, PortResult};

/// A storage backend that is never available.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> PortResult<Option<String>> {
        Err(PortError::Unavailable("disk gone".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> PortResult<()> {
        Err(PortError::Unavailable("disk gone".to_string()))
    }

    fn remove(&self, _key: &str) -> PortResult<()> {
        Err(PortError::Unavailable("disk gone".to_string()))
    }
}

/// Remembers every theme flag applied to it.
pub struct RecordingHost {
    prefers_dark: bool,
    applied: Mutex<Vec<Theme>>,
}

impl RecordingHost {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            prefers_dark,
            applied: Mutex::new(Vec::new()),
        }
    }

    pub fn applied(&self) -> Vec<Theme> {
        self.applied.lock().unwrap().clone()
    }
}

impl DisplayHost for RecordingHost {
    fn prefers_dark_scheme(&self) -> bool {
        self.prefers_dark
    }

    fn apply_theme(&self, theme: Theme) {
        self.applied.lock().unwrap().push(theme);
    }
}

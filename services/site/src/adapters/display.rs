//! services/site/src/adapters/display.rs
//!
//! The server-side stand-in for the page's root element. It reports the configured
//! colour-scheme hint and keeps the root theme class that clients render with.

use najm_core::domain::Theme;
use najm_core::ports::DisplayHost;
use std::sync::RwLock;
use tracing::debug;

pub struct RootClassDisplay {
    prefers_dark: bool,
    applied: RwLock<Option<Theme>>,
}

impl RootClassDisplay {
    pub fn new(preferred_scheme: Theme) -> Self {
        Self {
            prefers_dark: preferred_scheme.is_dark(),
            applied: RwLock::new(None),
        }
    }

    /// The class on the document root: `"dark"` or empty.
    pub fn root_class(&self) -> &'static str {
        let applied = self.applied.read().map(|theme| *theme).unwrap_or(None);
        match applied {
            Some(Theme::Dark) => "dark",
            _ => "",
        }
    }
}

impl DisplayHost for RootClassDisplay {
    fn prefers_dark_scheme(&self) -> bool {
        self.prefers_dark
    }

    fn apply_theme(&self, theme: Theme) {
        match self.applied.write() {
            Ok(mut applied) => *applied = Some(theme),
            Err(poisoned) => *poisoned.into_inner() = Some(theme),
        }
        debug!("Root theme class is now '{}'", self.root_class());
    }
}

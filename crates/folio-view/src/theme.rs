//! Light/dark theme state.
//!
//! Initial value: persisted choice, then the system color-scheme preference,
//! then a time-of-day guess. Until the visitor toggles explicitly the theme
//! keeps following live system preference changes.

use folio_storage::{KeyValueStore, StorageAdapter};
use folio_types::{Theme, keys};
use tracing::{debug, warn};

/// Result of the `prefers-color-scheme` media queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemScheme {
    Dark,
    Light,
    NoPreference,
}

impl SystemScheme {
    pub fn from_flags(prefers_dark: bool, prefers_light: bool) -> Self {
        if prefers_dark {
            SystemScheme::Dark
        } else if prefers_light {
            SystemScheme::Light
        } else {
            SystemScheme::NoPreference
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Persisted,
    System,
    TimeOfDay,
    User,
}

pub fn theme_for_hour(local_hour: u32) -> Theme {
    if local_hour < 7 || local_hour > 19 {
        Theme::Dark
    } else {
        Theme::Light
    }
}

#[derive(Debug, Clone)]
pub struct ThemeController {
    theme: Theme,
    source: ThemeSource,
}

impl ThemeController {
    pub fn resolve<S: KeyValueStore>(
        storage: &StorageAdapter<S>,
        system: SystemScheme,
        local_hour: u32,
    ) -> Self {
        if let Some(raw) = storage.get(keys::THEME) {
            match raw.parse::<Theme>() {
                Ok(theme) => {
                    return Self {
                        theme,
                        source: ThemeSource::Persisted,
                    };
                }
                Err(err) => warn!(error = %err, "ignoring stored theme"),
            }
        }

        let (theme, source) = match system {
            SystemScheme::Dark => (Theme::Dark, ThemeSource::System),
            SystemScheme::Light => (Theme::Light, ThemeSource::System),
            SystemScheme::NoPreference => (theme_for_hour(local_hour), ThemeSource::TimeOfDay),
        };
        debug!(theme = %theme, ?source, "resolved initial theme");
        Self { theme, source }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self.source, ThemeSource::Persisted | ThemeSource::User)
    }

    /// Flip the theme and persist it. A failed write is logged; the in-page
    /// theme still changes.
    pub fn toggle<S: KeyValueStore>(&mut self, storage: &StorageAdapter<S>) -> Theme {
        self.theme = self.theme.toggled();
        self.source = ThemeSource::User;
        if let Err(err) = storage.set(keys::THEME, self.theme.as_str()) {
            warn!(error = %err, "failed to persist theme");
        }
        self.theme
    }

    /// Live `prefers-color-scheme` change. Returns the new theme only when it
    /// was applied.
    pub fn on_system_change<S: KeyValueStore>(
        &mut self,
        storage: &StorageAdapter<S>,
        prefers_dark: bool,
    ) -> Option<Theme> {
        if self.is_explicit() || storage.get(keys::THEME).is_some() {
            return None;
        }
        self.theme = if prefers_dark { Theme::Dark } else { Theme::Light };
        self.source = ThemeSource::System;
        Some(self.theme)
    }
}

//! Persisted user preferences (last chosen language)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::types::Language;

/// What survives between sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub language: Option<Language>,
}

/// JSON-file backed preference storage.
///
/// A `None` path disables persistence (no config directory available).
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
}

impl PreferenceStore {
    /// Store at `<config dir>/tetotype/preferences.json`
    pub fn default_location() -> Self {
        Self {
            path: dirs::config_dir().map(|dir| dir.join("tetotype").join("preferences.json")),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    /// In-memory only
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read preferences; a missing or unreadable file yields defaults
    pub fn load(&self) -> Preferences {
        let Some(path) = &self.path else {
            return Preferences::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("Ignoring malformed preferences at {}: {}", path.display(), e);
                Preferences::default()
            }),
            Err(_) => Preferences::default(),
        }
    }

    pub fn save(&self, prefs: &Preferences) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        std::fs::write(path, json)?;
        debug!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Remember the language; failures are logged, never raised
    pub fn remember_language(&self, language: Language) {
        let mut prefs = self.load();
        prefs.language = Some(language);
        if let Err(e) = self.save(&prefs) {
            warn!("Could not persist language preference: {}", e);
        }
    }
}

/// Language to start with: persisted choice, then system locale, then English
pub fn initial_language(store: &PreferenceStore) -> Language {
    if let Some(lang) = store.load().language {
        return lang;
    }
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|locale| Language::from_locale(&locale))
        .unwrap_or_default()
}

//! Translation store: remote string tables with a built-in English fallback
//!
//! Lookup order: loaded table → built-in English table → caller fallback.

use lazy_static::lazy_static;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::core::api::SurveyBackend;
use crate::core::prefs::PreferenceStore;
use crate::types::Language;

lazy_static! {
    /// Strings needed for baseline usability when the i18n endpoint is down
    static ref BUILTIN_ENGLISH: HashMap<&'static str, &'static str> = [
        ("home.title", "Gender Test"),
        ("home.description", "Let's find out your type. Please select your gender."),
        ("home.male_button", "Male"),
        ("home.female_button", "Female"),
        ("home.start_button", "Start Survey"),
        ("home.gender_select_alert", "Please select a gender."),
        ("survey.title", "Survey"),
        ("survey.description", "Please answer all questions."),
        ("survey.loading", "Loading questions..."),
        ("survey.error", "Error:"),
        ("survey.not_found", "No questions found."),
        ("survey.submit_button", "View Result"),
        ("survey.submitting", "Submitting..."),
        ("survey.go_home_button", "Go to Home"),
        ("result.title", "Your Type Is..."),
        ("result.explanation_label", "Explanation:"),
        ("result.advice_label", "Advice:"),
        ("result.not_found", "Could not retrieve results. Please take the survey again."),
        ("result.go_home_button", "Retake Survey"),
        ("result.save_button", "Save Result"),
        ("result.copy_text", "Copy Text"),
        ("result.save_image", "Save as Image"),
        ("result.save_html", "Save as HTML"),
        ("result.share_button", "Share"),
        ("result.share_copied", "Link copied to clipboard"),
        ("app.dark_mode_button", "Dark Mode"),
        ("app.light_mode_button", "Light Mode"),
    ]
    .into_iter()
    .collect();
}

/// Where the active table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationSource {
    /// Nothing loaded yet
    Empty,
    /// Fetched from the i18n endpoint
    Remote,
    /// Fetch failed, built-in English in use
    Builtin,
}

/// UI strings for the current language
#[derive(Debug)]
pub struct TranslationStore {
    language: Language,
    table: HashMap<String, String>,
    source: TranslationSource,
    prefs: PreferenceStore,
}

impl TranslationStore {
    pub fn new(language: Language, prefs: PreferenceStore) -> Self {
        Self {
            language,
            table: HashMap::new(),
            source: TranslationSource::Empty,
            prefs,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn source(&self) -> TranslationSource {
        self.source
    }

    /// Fetch the table for `language`, replacing the current one wholesale.
    ///
    /// The language choice is persisted first. On any fetch failure the
    /// table is cleared so lookups resolve against built-in English.
    pub async fn load(&mut self, backend: &dyn SurveyBackend, language: Language) -> TranslationSource {
        self.language = language;
        self.prefs.remember_language(language);

        match backend.fetch_translations(language).await {
            Ok(table) => {
                info!("Loaded {} translations for {}", table.len(), language);
                self.table = table;
                self.source = TranslationSource::Remote;
            }
            Err(e) => {
                warn!("Failed to fetch translations, falling back to English: {}", e);
                self.table.clear();
                self.source = TranslationSource::Builtin;
            }
        }
        self.source
    }

    /// Language selector: same as `load`
    pub async fn set_language(&mut self, backend: &dyn SurveyBackend, language: Language) -> TranslationSource {
        self.load(backend, language).await
    }

    /// Loaded or built-in string, without the caller fallback
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.table
            .get(key)
            .map(String::as_str)
            .or_else(|| BUILTIN_ENGLISH.get(key).copied())
    }

    /// String for `key`, or the key itself when nothing matches
    pub fn get(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    /// String for `key`, or `fallback` when nothing matches
    pub fn get_or(&self, key: &str, fallback: &str) -> String {
        self.lookup(key).unwrap_or(fallback).to_string()
    }
}

//! Questions as served by the question endpoint

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One survey question.
///
/// `options` arrives as a JSON array *encoded in a string*
/// (`"[\"A\",\"B\"]"`), or empty/null for free-text questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(default, deserialize_with = "string_or_nothing")]
    pub options: Option<String>,
}

/// Anything other than a string leaves the question free text only
fn string_or_nothing<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => Some(raw),
        Value::Null => None,
        other => {
            tracing::debug!(options = %other, "options not a string, free text only");
            None
        }
    })
}

impl Question {
    pub fn new(question: impl Into<String>, options: Option<&str>) -> Self {
        Self {
            question: question.into(),
            options: options.map(str::to_string),
        }
    }

    /// Selectable options.
    ///
    /// Empty when the question is free-text only: no options, an empty array,
    /// a leading blank entry (`[""]`), or an encoding that fails to parse.
    pub fn option_list(&self) -> Vec<String> {
        let raw = match self.options.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Vec::new(),
        };

        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(options) => {
                if options.first().map(|o| o.is_empty()).unwrap_or(true) {
                    Vec::new()
                } else {
                    options
                }
            }
            Err(e) => {
                tracing::debug!(question = %self.question, error = %e, "unparseable options, free text only");
                Vec::new()
            }
        }
    }
}

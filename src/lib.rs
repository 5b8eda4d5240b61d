//! Tetotype: terminal client for the Teto/Egen personality survey
//!
//! Home (gender) → Survey (questions, answers, submit) → Result (render, export, share)

pub mod core;
pub mod types;

// =============================================================================
// API ENDPOINTS
// =============================================================================

/// Default API origin
pub const DEFAULT_API_BASE: &str = "https://coni.myds.me";

/// Question list, scoped by `lang`
pub const QUESTIONS_PATH: &str = "/api/questions";

/// Answer evaluation
pub const EVALUATE_PATH: &str = "/api/evaluate";

/// UI string table, scoped by `lang`
pub const I18N_PATH: &str = "/api/i18n";

/// Request timeout for every API call (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// WIRE CONVENTIONS
// =============================================================================

/// Suffix the evaluation endpoint expects on free-text answer keys
pub const FREE_TEXT_SUFFIX: &str = "_freeText";

/// Query parameter carrying the encoded result in a share link
pub const SHARE_DATA_PARAM: &str = "data";

/// Hash route of the result screen
pub const RESULT_ROUTE: &str = "#/result";

// =============================================================================
// EXPORTS
// =============================================================================

pub const EXPORT_JSON_FILE: &str = "result.json";
pub const EXPORT_HTML_FILE: &str = "result.html";
pub const EXPORT_PNG_FILE: &str = "result.png";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

//! Error taxonomy for the survey client
//!
//! None of these are fatal to the process; each one narrows the screen the
//! user sees (error screen, inline message, not-found view, log line).

use thiserror::Error;

/// Every failure the library reports
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    /// Required input missing (no gender, no question list, flow already done)
    #[error("missing precondition: {0}")]
    MissingPrecondition(String),

    /// Question or translation fetch failed
    #[error("load failed: {0}")]
    LoadError(String),

    /// Current question unanswered
    #[error("{0}")]
    ValidationError(String),

    /// Evaluation call failed
    #[error("submit failed: {0}")]
    SubmitError(String),

    /// Shared result payload could not be decoded
    #[error("decode failed: {0}")]
    DecodeError(String),

    /// Clipboard, file or snapshot export failed
    #[error("export failed: {0}")]
    ExportError(String),

    /// Native share or its clipboard fallback failed
    #[error("share failed: {0}")]
    ShareError(String),
}

impl SurveyError {
    /// Stable code string (for logging and `--json` output)
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingPrecondition(_) => "E001_MISSING_PRECONDITION",
            Self::LoadError(_) => "E002_LOAD_ERROR",
            Self::ValidationError(_) => "E003_VALIDATION_ERROR",
            Self::SubmitError(_) => "E004_SUBMIT_ERROR",
            Self::DecodeError(_) => "E005_DECODE_ERROR",
            Self::ExportError(_) => "E006_EXPORT_ERROR",
            Self::ShareError(_) => "E007_SHARE_ERROR",
        }
    }

    /// Whether the user can fix this without leaving the current screen
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// The message carried by the variant
    pub fn message(&self) -> &str {
        match self {
            Self::MissingPrecondition(m)
            | Self::LoadError(m)
            | Self::ValidationError(m)
            | Self::SubmitError(m)
            | Self::DecodeError(m)
            | Self::ExportError(m)
            | Self::ShareError(m) => m,
        }
    }
}

pub type SurveyResult<T> = std::result::Result<T, SurveyError>;

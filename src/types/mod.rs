//! Core types for the survey client

mod answer;
mod error;
mod language;
mod question;
mod result;
mod state;

pub use answer::{Answer, AnswerSheet, EmptyAnswerPolicy};
pub use error::{SurveyError, SurveyResult};
pub use language::{Gender, Language, Theme};
pub use question::Question;
pub use result::{PersonalityType, TypeResult};
pub use state::FlowPhase;

//! Survey flow controller: question paging, answer capture, submission
//!
//! Phases:
//! - UNINITIALIZED → LOADING: initialize() with a gender
//! - LOADING → ERROR: question fetch failed
//! - LOADING → ANSWERING(0): questions loaded (possibly none)
//! - ANSWERING(n-1) → SUBMITTING → COMPLETED(result)
//! - SUBMITTING → ANSWERING(n-1): evaluation failed, error kept for display

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::api::{EvaluateRequest, SurveyBackend};
use crate::types::{
    Answer, AnswerSheet, EmptyAnswerPolicy, FlowPhase, Gender, Language, Question, SurveyError,
    SurveyResult, TypeResult,
};

/// Shown when advancing or submitting past an unanswered question
pub const UNANSWERED_MESSAGE: &str = "Please select an option or enter your answer.";

/// Position in the question list, for the progress bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 1-based number of the displayed question
    pub current: usize,
    pub total: usize,
    pub percent: f64,
}

/// One run through the survey screen
pub struct SurveyFlow {
    backend: Arc<dyn SurveyBackend>,
    policy: EmptyAnswerPolicy,
    gender: Option<Gender>,
    language: Language,
    questions: Vec<Question>,
    answers: AnswerSheet,
    step: usize,
    phase: FlowPhase,
    last_error: Option<SurveyError>,
}

impl SurveyFlow {
    pub fn new(backend: Arc<dyn SurveyBackend>) -> Self {
        Self {
            backend,
            policy: EmptyAnswerPolicy::default(),
            gender: None,
            language: Language::default(),
            questions: Vec::new(),
            answers: AnswerSheet::new(),
            step: 0,
            phase: FlowPhase::Uninitialized,
            last_error: None,
        }
    }

    /// Choose how an empty free-text answer gates advance/submit
    pub fn with_policy(mut self, policy: EmptyAnswerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch the questions for `language`.
    ///
    /// Without a gender this fails with `MissingPrecondition` and never
    /// touches the network. Returns the number of questions loaded.
    pub async fn initialize(&mut self, gender: Option<Gender>, language: Language) -> SurveyResult<usize> {
        let Some(gender) = gender else {
            let err = SurveyError::MissingPrecondition(
                "Gender information is missing. Please go back to home.".to_string(),
            );
            self.phase = FlowPhase::Error(err.message().to_string());
            self.last_error = Some(err.clone());
            return Err(err);
        };

        self.gender = Some(gender);
        self.language = language;
        self.phase = FlowPhase::Loading;
        debug!("Loading questions for {} ({})", gender, language);

        match self.backend.fetch_questions(language).await {
            Ok(questions) => {
                info!("Survey ready with {} questions", questions.len());
                self.questions = questions;
                self.answers = AnswerSheet::new();
                self.step = 0;
                self.phase = FlowPhase::Answering(0);
                self.last_error = None;
                Ok(self.questions.len())
            }
            Err(e) => {
                warn!("Question fetch failed: {}", e);
                self.phase = FlowPhase::Error(e.message().to_string());
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn policy(&self) -> EmptyAnswerPolicy {
        self.policy
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.step)
    }

    /// Last error, kept until the next successful load or submit
    pub fn last_error(&self) -> Option<&SurveyError> {
        self.last_error.as_ref()
    }

    pub fn is_last_step(&self) -> bool {
        self.step + 1 >= self.questions.len()
    }

    pub fn answer_for(&self, question: &str) -> &Answer {
        self.answers.get(question)
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn is_answered(&self, question: &str) -> bool {
        self.answers.get(question).is_answered(self.policy)
    }

    /// Whether the displayed question may be left (next/submit enabled)
    pub fn current_is_answered(&self) -> bool {
        self.current_question()
            .map(|q| self.is_answered(&q.question))
            .unwrap_or(false)
    }

    /// Option buttons for the displayed question; empty means free text only
    pub fn current_options(&self) -> Vec<String> {
        self.current_question().map(Question::option_list).unwrap_or_default()
    }

    pub fn progress(&self) -> Progress {
        let total = self.questions.len();
        let current = self.step + 1;
        let percent = if total == 0 {
            0.0
        } else {
            current as f64 / total as f64 * 100.0
        };
        Progress { current, total, percent }
    }

    /// Translation key of the prompt above the displayed question
    pub fn prompt_key(&self) -> String {
        format!("survey.question.{}.title", self.step + 1)
    }

    fn ensure_ready(&self) -> SurveyResult<()> {
        match &self.phase {
            FlowPhase::Answering(_) => Ok(()),
            FlowPhase::Completed(_) => Err(SurveyError::MissingPrecondition(
                "survey already completed".to_string(),
            )),
            _ => Err(SurveyError::MissingPrecondition(
                "questions have not been loaded".to_string(),
            )),
        }
    }

    /// Choose an option, replacing any free text for the same question
    pub fn record_option(&mut self, question: &str, option: &str) -> SurveyResult<()> {
        self.ensure_ready()?;
        self.answers.set(question, Answer::Option(option.to_string()));
        Ok(())
    }

    /// Type an answer, replacing any chosen option for the same question
    pub fn record_free_text(&mut self, question: &str, text: &str) -> SurveyResult<()> {
        self.ensure_ready()?;
        self.answers.set(question, Answer::FreeText(text.to_string()));
        Ok(())
    }

    fn require_current_answered(&self) -> SurveyResult<()> {
        if self.current_is_answered() {
            Ok(())
        } else {
            Err(SurveyError::ValidationError(UNANSWERED_MESSAGE.to_string()))
        }
    }

    /// Move to the next question; the current one must be answered.
    ///
    /// Stays on the last step (submission takes over there).
    pub fn advance(&mut self) -> SurveyResult<usize> {
        self.ensure_ready()?;
        self.require_current_answered()?;
        let last = self.questions.len().saturating_sub(1);
        self.step = (self.step + 1).min(last);
        self.phase = FlowPhase::Answering(self.step);
        Ok(self.step)
    }

    /// Move to the previous question. Answers are kept.
    pub fn retreat(&mut self) -> usize {
        self.step = self.step.saturating_sub(1);
        if self.phase.is_ready() {
            self.phase = FlowPhase::Answering(self.step);
        }
        self.step
    }

    /// Post every answer for evaluation.
    ///
    /// Only valid on the final step with its question answered.
    pub async fn submit(&mut self) -> SurveyResult<TypeResult> {
        self.ensure_ready()?;
        if self.questions.is_empty() || !self.is_last_step() {
            return Err(SurveyError::ValidationError(UNANSWERED_MESSAGE.to_string()));
        }
        self.require_current_answered()?;

        let gender = self.gender.ok_or_else(|| {
            SurveyError::MissingPrecondition("Gender information is missing.".to_string())
        })?;
        let request = EvaluateRequest {
            gender,
            answers: self.answers.to_wire(),
            lang: self.language,
        };

        self.phase = FlowPhase::Submitting;
        info!("Submitting {} answers", request.answers.len());

        match self.backend.evaluate(&request).await {
            Ok(result) => {
                info!("Evaluation complete: {}", result.kind);
                self.phase = FlowPhase::Completed(result.clone());
                self.last_error = None;
                Ok(result)
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                self.phase = FlowPhase::Answering(self.step);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

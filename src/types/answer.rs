//! Per-question answers

use std::collections::{BTreeMap, HashMap};

use crate::FREE_TEXT_SUFFIX;

/// The answer to one question. An option choice and a free-text answer
/// cannot coexist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Answer {
    #[default]
    Unanswered,
    Option(String),
    FreeText(String),
}

/// Whether a recorded empty free-text answer lets the user move on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyAnswerPolicy {
    /// `FreeText("")` blocks advance/submit
    #[default]
    CountsAsUnanswered,
    /// Any recorded value unblocks, even empty text
    CountsAsAnswered,
}

impl Answer {
    pub fn is_answered(&self, policy: EmptyAnswerPolicy) -> bool {
        match self {
            Answer::Unanswered => false,
            Answer::Option(_) => true,
            Answer::FreeText(text) => match policy {
                EmptyAnswerPolicy::CountsAsAnswered => true,
                EmptyAnswerPolicy::CountsAsUnanswered => !text.is_empty(),
            },
        }
    }

    /// The chosen option, if any
    pub fn selected_option(&self) -> Option<&str> {
        match self {
            Answer::Option(o) => Some(o),
            _ => None,
        }
    }

    /// The typed text, if any
    pub fn free_text(&self) -> Option<&str> {
        match self {
            Answer::FreeText(t) => Some(t),
            _ => None,
        }
    }
}

/// Answers keyed by question text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: HashMap<String, Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question: &str) -> &Answer {
        static UNANSWERED: Answer = Answer::Unanswered;
        self.answers.get(question).unwrap_or(&UNANSWERED)
    }

    pub fn set(&mut self, question: &str, answer: Answer) {
        if answer == Answer::Unanswered {
            self.answers.remove(question);
        } else {
            self.answers.insert(question.to_string(), answer);
        }
    }

    /// Number of questions holding an option or free-text answer
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Combined answer map in the shape the evaluation endpoint expects:
    /// option answers under the question text, free-text answers under
    /// `question + "_freeText"`.
    pub fn to_wire(&self) -> BTreeMap<String, String> {
        self.answers
            .iter()
            .filter_map(|(question, answer)| match answer {
                Answer::Option(option) => Some((question.clone(), option.clone())),
                Answer::FreeText(text) => {
                    Some((format!("{}{}", question, FREE_TEXT_SUFFIX), text.clone()))
                }
                Answer::Unanswered => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_free_text_policy() {
        let empty = Answer::FreeText(String::new());
        assert!(!empty.is_answered(EmptyAnswerPolicy::CountsAsUnanswered));
        assert!(empty.is_answered(EmptyAnswerPolicy::CountsAsAnswered));
        assert!(!Answer::Unanswered.is_answered(EmptyAnswerPolicy::CountsAsAnswered));
    }

    #[test]
    fn test_sheet_replaces_answer_kind() {
        let mut sheet = AnswerSheet::new();
        sheet.set("Q", Answer::Option("A".into()));
        sheet.set("Q", Answer::FreeText("mine".into()));
        assert_eq!(sheet.get("Q"), &Answer::FreeText("mine".into()));
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_wire_keys() {
        let mut sheet = AnswerSheet::new();
        sheet.set("Q1", Answer::Option("A".into()));
        sheet.set("Q2", Answer::FreeText("typed".into()));

        let wire = sheet.to_wire();
        assert_eq!(wire.get("Q1").map(String::as_str), Some("A"));
        assert_eq!(wire.get("Q2_freeText").map(String::as_str), Some("typed"));
        assert!(!wire.contains_key("Q2"));
    }
}

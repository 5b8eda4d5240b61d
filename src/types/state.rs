//! Survey flow phases

use crate::types::TypeResult;

/// Where a survey flow currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowPhase {
    /// Nothing fetched yet
    Uninitialized,
    /// Question request in flight
    Loading,
    /// Question fetch failed; only "go home" remains
    Error(String),
    /// Showing the question at this step
    Answering(usize),
    /// Evaluation request in flight
    Submitting,
    /// Terminal: result received
    Completed(TypeResult),
}

impl FlowPhase {
    pub fn is_ready(&self) -> bool {
        matches!(self, FlowPhase::Answering(_))
    }
}

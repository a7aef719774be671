//! Quiz error types.
//!
//! The only failure the quiz itself knows about is an empty question bank.
//! Everything past construction is infallible: transitions on a finished or
//! empty quiz are no-ops rather than errors.

use thiserror::Error;

/// Errors surfaced while building a quiz or its configuration.
#[derive(Debug, Error)]
pub enum QuizError {
    /// No candidate source yielded any claim records.
    #[error("no claim data found (searched: {})", .searched.join(", "))]
    NoData { searched: Vec<String> },

    /// The configuration cannot be used to build a quiz.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl QuizError {
    /// Returns `true` if this error means the session has no quiz at all.
    ///
    /// No-data is fatal for the session and is never retried.
    pub fn is_no_data(&self) -> bool {
        matches!(self, QuizError::NoData { .. })
    }
}

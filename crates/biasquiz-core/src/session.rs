//! Session-scoped quiz holder.
//!
//! A [`QuizSession`] owns exactly one [`Quiz`] together with the loader that
//! built it. Every UI event becomes one [`Command`], applied synchronously.
//! Sessions never share state with each other.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::QuizError;
use crate::loader::ClaimLoader;
use crate::quiz::Quiz;
use crate::report::{QuizReport, Score};

/// One user action, mapped to exactly one quiz transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Answer the current claim (`true` = authentic).
    Answer(bool),
    Prev,
    Next,
    Submit,
    /// Throw the quiz away and build a freshly shuffled one.
    Restart,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Answer(true) => write!(f, "answer authentic"),
            Command::Answer(false) => write!(f, "answer fake"),
            Command::Prev => write!(f, "previous"),
            Command::Next => write!(f, "next"),
            Command::Submit => write!(f, "submit"),
            Command::Restart => write!(f, "restart"),
        }
    }
}

/// A single user's quiz session.
#[derive(Debug)]
pub struct QuizSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    loader: ClaimLoader,
    quiz: Quiz,
}

impl QuizSession {
    /// Build the first quiz. On `NoData` no session exists.
    pub fn start(loader: ClaimLoader) -> Result<Self, QuizError> {
        let quiz = Quiz::create(&loader)?;
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "session started");
        Ok(Self {
            id,
            started_at: Utc::now(),
            loader,
            quiz,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the current quiz was created.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn score(&self) -> Score {
        self.quiz.score()
    }

    pub fn report(&self) -> QuizReport {
        QuizReport::from_quiz(&self.quiz, self.id, self.started_at)
    }

    /// Apply one command. Only `Restart` can fail, and only when the claim
    /// sources no longer yield any data; the current quiz is then kept.
    pub fn apply(&mut self, command: Command) -> Result<(), QuizError> {
        tracing::trace!(session = %self.id, %command, "apply");
        match command {
            Command::Answer(value) => self.quiz.answer(value),
            Command::Prev => self.quiz.go_prev(),
            Command::Next => self.quiz.go_next(),
            Command::Submit => self.quiz.submit(),
            Command::Restart => self.restart()?,
        }
        Ok(())
    }

    /// Replace the quiz wholesale with a freshly loaded one.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        let quiz = Quiz::create(&self.loader)?;
        self.quiz = quiz;
        self.started_at = Utc::now();
        tracing::info!(session = %self.id, "quiz restarted");
        Ok(())
    }
}

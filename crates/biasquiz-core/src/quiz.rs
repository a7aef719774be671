//! The quiz state machine.
//!
//! A [`Quiz`] owns a fixed list of claims, the index-aligned answers, a cursor
//! and two mode flags. Transitions never fail: calling one on a submitted quiz
//! or with the cursor out of range leaves the quiz unchanged.

use crate::error::QuizError;
use crate::loader::ClaimLoader;
use crate::model::{Answer, Claim};
use crate::report::Score;

/// A single quiz run.
#[derive(Debug, Clone)]
pub struct Quiz {
    claims: Vec<Claim>,
    answers: Vec<Answer>,
    current_index: usize,
    revealed: bool,
    submitted: bool,
}

impl Quiz {
    /// Load a fresh, shuffled claim list and start a quiz over it.
    pub fn create(loader: &ClaimLoader) -> Result<Self, QuizError> {
        let claims = loader.load()?;
        if claims.is_empty() {
            return Err(QuizError::NoData {
                searched: loader.source_names(),
            });
        }
        tracing::info!(claims = claims.len(), "created quiz");
        Ok(Self::from_claims(claims))
    }

    /// Start a quiz over an already prepared claim list, in the given order.
    ///
    /// Returns `NoData` for an empty list.
    pub fn new(claims: Vec<Claim>) -> Result<Self, QuizError> {
        if claims.is_empty() {
            return Err(QuizError::NoData { searched: vec![] });
        }
        Ok(Self::from_claims(claims))
    }

    fn from_claims(claims: Vec<Claim>) -> Self {
        let answers = vec![Answer::default(); claims.len()];
        Self {
            claims,
            answers,
            current_index: 0,
            revealed: false,
            submitted: false,
        }
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether the verdict for the current claim is shown.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn current_claim(&self) -> Option<&Claim> {
        self.claims.get(self.current_index)
    }

    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.get(self.current_index)
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.claims.len()
    }

    /// Record `value` (`true` = authentic) for the current claim and reveal
    /// the verdict. Overwrites any earlier answer to the same claim.
    pub fn answer(&mut self, value: bool) {
        if self.submitted {
            return;
        }
        let i = self.current_index;
        let Some(claim) = self.claims.get(i) else {
            return;
        };
        self.answers[i] = Answer::record(value, claim);
        self.revealed = true;
    }

    pub fn go_prev(&mut self) {
        if self.submitted || self.claims.is_empty() {
            return;
        }
        self.current_index = self.current_index.saturating_sub(1);
        self.sync_revealed();
    }

    pub fn go_next(&mut self) {
        if self.submitted || self.claims.is_empty() {
            return;
        }
        if self.current_index + 1 < self.claims.len() {
            self.current_index += 1;
        }
        self.sync_revealed();
    }

    // Reveal follows the newly current claim, not the one we left.
    fn sync_revealed(&mut self) {
        self.revealed = self
            .answers
            .get(self.current_index)
            .is_some_and(Answer::is_answered);
    }

    pub fn all_answered(&self) -> bool {
        self.answers.iter().all(Answer::is_answered)
    }

    /// Number of answered claims.
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_answered()).count()
    }

    /// Finalize the quiz. Does not require every claim to be answered; callers
    /// gate this on [`Quiz::all_answered`].
    pub fn submit(&mut self) {
        if !self.submitted {
            tracing::info!(score = %self.score(), "quiz submitted");
        }
        self.submitted = true;
    }

    /// Current score, recomputed on every call.
    pub fn score(&self) -> Score {
        let correct = self
            .answers
            .iter()
            .filter(|a| a.is_correct() == Some(true))
            .count();
        Score {
            correct,
            total: self.claims.len(),
        }
    }
}

//! Score and results review for a finished quiz.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Verdict;
use crate::quiz::Quiz;

/// Correct answers out of total claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Fraction of claims answered correctly, 0.0 for an empty quiz.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// The results view: final score plus one row per claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Session the quiz belonged to.
    pub session_id: Uuid,
    /// When the quiz was started.
    pub started_at: DateTime<Utc>,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    pub score: Score,
    pub rows: Vec<ReviewRow>,
}

/// Review of a single claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRow {
    /// 1-based position in the quiz.
    pub position: usize,
    pub title: String,
    pub definition: String,
    pub category: String,
    pub reference: String,
    /// What the user chose, `None` if the claim was left unanswered.
    pub chosen: Option<Verdict>,
    pub expected: Verdict,
    pub correct: bool,
}

impl QuizReport {
    pub fn from_quiz(quiz: &Quiz, session_id: Uuid, started_at: DateTime<Utc>) -> Self {
        let rows = quiz
            .claims()
            .iter()
            .zip(quiz.answers())
            .enumerate()
            .map(|(idx, (claim, answer))| ReviewRow {
                position: idx + 1,
                title: claim.title.clone(),
                definition: claim.definition.clone(),
                category: claim.category.clone(),
                reference: claim.reference.clone(),
                chosen: answer.verdict(),
                expected: claim.expected(),
                correct: answer.is_correct().unwrap_or(false),
            })
            .collect();

        Self {
            session_id,
            started_at,
            generated_at: Utc::now(),
            score: quiz.score(),
            rows,
        }
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Final score:** {} ({:.0}%)\n\n",
            self.score,
            self.score.percent()
        ));
        md.push_str(&format!(
            "**Started:** {}\n\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md.push_str("| # | Bias | Definition | Category | You | Expected | Result |\n");
        md.push_str("|---|------|------------|----------|-----|----------|--------|\n");
        for row in &self.rows {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                row.position,
                escape_cell(&row.title),
                escape_cell(&row.definition),
                escape_cell(&row.category),
                chosen_label(row.chosen),
                row.expected,
                if row.correct { "Correct" } else { "Incorrect" }
            ));
        }

        let references: Vec<&ReviewRow> =
            self.rows.iter().filter(|r| !r.reference.is_empty()).collect();
        if !references.is_empty() {
            md.push_str("\n### References\n\n");
            for row in references {
                md.push_str(&format!("{}. {}: {}\n", row.position, row.title, row.reference));
            }
        }

        md
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Display label for an optional verdict; unanswered shows as a dash.
pub fn chosen_label(chosen: Option<Verdict>) -> String {
    chosen.map_or_else(|| "-".to_string(), |v| v.to_string())
}

//! Terminal rendering of the quiz and results views.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use anyhow::Result;
use comfy_table::{Cell, Table};

use biasquiz_core::loader::DEFAULT_SOURCES;
use biasquiz_core::report::{chosen_label, QuizReport};
use biasquiz_core::Quiz;

const PROGRESS_WIDTH: usize = 20;

/// How the final results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsFormat {
    Text,
    Json,
    Markdown,
}

impl fmt::Display for ResultsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsFormat::Text => write!(f, "text"),
            ResultsFormat::Json => write!(f, "json"),
            ResultsFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ResultsFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ResultsFormat::Text),
            "json" => Ok(ResultsFormat::Json),
            "markdown" | "md" => Ok(ResultsFormat::Markdown),
            other => Err(format!("unknown results format: {other}")),
        }
    }
}

/// Render the current claim, its verdict if revealed, and the controls.
pub fn render_question<W: Write>(out: &mut W, quiz: &Quiz) -> io::Result<()> {
    let Some(claim) = quiz.current_claim() else {
        return Ok(());
    };
    let i = quiz.current_index();
    let total = quiz.len();

    writeln!(out)?;
    if claim.category.is_empty() {
        writeln!(out, "Question {}/{}: {}", i + 1, total, claim.title)?;
    } else {
        writeln!(
            out,
            "Question {}/{}: {} [{}]",
            i + 1,
            total,
            claim.title,
            claim.category
        )?;
    }
    writeln!(out, "  {}", claim.definition)?;

    if !quiz.is_revealed() {
        writeln!(out, "  [a] Authentic   [f] Fake")?;
    } else if let Some(answer) = quiz.current_answer() {
        if let Some(chosen) = answer.verdict() {
            let verdict = if answer.is_correct() == Some(true) {
                "Correct"
            } else {
                "Incorrect"
            };
            writeln!(
                out,
                "  {verdict}. You chose {chosen}. The correct answer is: {}.",
                claim.expected()
            )?;
        }
        if !claim.reference.is_empty() {
            writeln!(out, "  Reference: {}", claim.reference)?;
        }
    }

    writeln!(
        out,
        "{} {}/{} answered",
        progress_bar(i + 1, total),
        quiz.answered_count(),
        total
    )?;

    let mut controls = Vec::new();
    if !quiz.is_first() {
        controls.push("[p] prev");
    }
    if !quiz.is_last() {
        controls.push("[n] next");
    }
    if quiz.all_answered() {
        controls.push("[r] view results");
    }
    controls.push("[q] quit");
    writeln!(out, "{}", controls.join("  "))
}

fn progress_bar(position: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        position * PROGRESS_WIDTH / total
    };
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}

/// Render the results view in the requested format.
pub fn render_results<W: Write>(
    out: &mut W,
    report: &QuizReport,
    format: ResultsFormat,
) -> Result<()> {
    match format {
        ResultsFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        }
        ResultsFormat::Markdown => {
            writeln!(out, "{}", report.to_markdown())?;
        }
        ResultsFormat::Text => {
            writeln!(
                out,
                "\nFinal score: {} ({:.0}%)",
                report.score,
                report.score.percent()
            )?;
            if report.score.is_perfect() {
                writeln!(out, "Perfect score!")?;
            }
            writeln!(
                out,
                "Quiz started {}",
                report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
            )?;

            let mut table = Table::new();
            table.set_header(vec![
                "#",
                "Bias",
                "Definition",
                "Category",
                "You",
                "Expected",
                "Result",
            ]);
            for row in &report.rows {
                table.add_row(vec![
                    Cell::new(row.position),
                    Cell::new(&row.title),
                    Cell::new(&row.definition),
                    Cell::new(&row.category),
                    Cell::new(chosen_label(row.chosen)),
                    Cell::new(row.expected),
                    Cell::new(if row.correct { "Correct" } else { "Incorrect" }),
                ]);
            }
            writeln!(out, "{table}")?;

            for row in report.rows.iter().filter(|r| !r.reference.is_empty()) {
                writeln!(out, "  {}. Reference: {}", row.position, row.reference)?;
            }
        }
    }

    writeln!(out, "\nType `restart` to play again or `q` to quit.")?;
    Ok(())
}

pub fn render_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  a, authentic   mark the current bias as authentic")?;
    writeln!(out, "  f, fake        mark the current bias as fake")?;
    writeln!(out, "  p, prev        go to the previous bias")?;
    writeln!(out, "  n, next        go to the next bias")?;
    writeln!(out, "  r, results     view results (once every bias is answered)")?;
    writeln!(out, "  restart        start over with a new shuffle")?;
    writeln!(out, "  q, quit        leave the quiz")
}

/// Explanation shown when no claim file could be found.
pub fn no_data_help(searched: &[String]) -> String {
    let locations = if searched.is_empty() {
        DEFAULT_SOURCES.join(", ")
    } else {
        searched.join(", ")
    };

    format!(
        r#"Could not find a biases.json file in any expected location.

Searched: {locations}

Place a biases.json file in one of these locations, or pass --data <PATH>.
Run `biasquiz init` to create a sample file.

Expected format:
{{
  "biases": [
    {{
      "title": "Anchoring bias",
      "definition": "Example definition",
      "is_authentic": true,
      "reference": "Tversky & Kahneman, 1974",
      "category": "Decision-making"
    }}
  ]
}}"#
    )
}

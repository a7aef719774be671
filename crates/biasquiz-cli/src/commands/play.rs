//! The `biasquiz play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use biasquiz_core::config::load_config_from;
use biasquiz_core::loader::ClaimLoader;
use biasquiz_core::{Command, Quiz, QuizError, QuizSession};

use crate::ui::{self, ResultsFormat};

pub fn execute(
    data: Option<PathBuf>,
    limit: Option<usize>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let format: ResultsFormat = format.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(path) = data {
        config.prepend_source(path);
    }
    if let Some(limit) = limit {
        config.limit = limit;
    }
    config.validate()?;
    tracing::debug!(?config, "resolved configuration");

    let stderr = io::stderr();
    let mut session = QuizSession::start(ClaimLoader::from_config(&config))
        .map_err(|e| explain(&mut stderr.lock(), e))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(
        &mut session,
        stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
        format,
    )
}

/// Print the no-data help for `NoData` before handing the error back.
fn explain<E: Write>(err_out: &mut E, e: QuizError) -> anyhow::Error {
    if let QuizError::NoData { searched } = &e {
        let _ = writeln!(err_out, "{}\n", ui::no_data_help(searched));
    }
    e.into()
}

/// What one line of user input asks for.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Apply(Command),
    Help,
    Quit,
    Ignore,
    Reject(String),
}

/// Map a line of input to a step, hiding controls the current view would not
/// offer.
fn interpret(input: &str, quiz: &Quiz) -> Step {
    let cmd = input.trim().to_lowercase();

    match (quiz.is_submitted(), cmd.as_str()) {
        (_, "") => Step::Ignore,
        (_, "q" | "quit" | "exit") => Step::Quit,
        (_, "?" | "h" | "help") => Step::Help,
        (_, "restart") | (true, "r") => Step::Apply(Command::Restart),
        (true, _) => Step::Reject(
            "The quiz is finished. Type `restart` to play again or `q` to quit.".into(),
        ),
        (false, "a" | "authentic" | "f" | "fake") if quiz.is_revealed() => {
            Step::Reject("Already answered. Use `p` and `n` to move between biases.".into())
        }
        (false, "a" | "authentic") => Step::Apply(Command::Answer(true)),
        (false, "f" | "fake") => Step::Apply(Command::Answer(false)),
        (false, "p" | "prev") if quiz.is_first() => {
            Step::Reject("Already at the first bias.".into())
        }
        (false, "p" | "prev") => Step::Apply(Command::Prev),
        (false, "n" | "next") if quiz.is_last() => Step::Reject("Already at the last bias.".into()),
        (false, "n" | "next") => Step::Apply(Command::Next),
        (false, "r" | "results") if quiz.all_answered() => Step::Apply(Command::Submit),
        (false, "r" | "results") => Step::Reject(format!(
            "Answer every bias before viewing results ({}/{} answered).",
            quiz.answered_count(),
            quiz.len()
        )),
        (false, other) => Step::Reject(format!("Unknown command: {other}. Type `?` for help.")),
    }
}

/// Drive a session from line-oriented input until quit or end of input.
///
/// A restart that finds no data ends the game with the same help text that
/// startup prints, written to `err_out`.
pub fn run<R: BufRead, W: Write, E: Write>(
    session: &mut QuizSession,
    input: R,
    out: &mut W,
    err_out: &mut E,
    format: ResultsFormat,
) -> Result<()> {
    ui::render_question(out, session.quiz())?;
    prompt(out)?;

    for line in input.lines() {
        let line = line?;
        match interpret(&line, session.quiz()) {
            Step::Apply(command) => {
                session.apply(command).map_err(|e| explain(err_out, e))?;
                if session.quiz().is_submitted() {
                    ui::render_results(out, &session.report(), format)?;
                } else {
                    ui::render_question(out, session.quiz())?;
                }
            }
            Step::Help => ui::render_help(out)?,
            Step::Quit => break,
            Step::Ignore => {}
            Step::Reject(message) => writeln!(out, "{message}")?,
        }
        prompt(out)?;
    }

    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use biasquiz_core::loader::{FileSource, InlineSource};
    use std::io::Cursor;

    const BANK: &str = r#"{"biases": [
        {"title": "Anchoring bias", "definition": "a", "is_authentic": true},
        {"title": "Mirror fallacy", "definition": "b", "is_authentic": false},
        {"title": "Halo effect", "definition": "c", "is_authentic": true}
    ]}"#;

    fn session() -> QuizSession {
        QuizSession::start(ClaimLoader::new(10).with_source(InlineSource::new("bank", BANK)))
            .unwrap()
    }

    fn play(session: &mut QuizSession, input: &str) -> String {
        let mut out = Vec::new();
        run(
            session,
            Cursor::new(input),
            &mut out,
            &mut io::sink(),
            ResultsFormat::Text,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn interpret_gates_controls() {
        let mut s = session();
        assert_eq!(interpret("  A ", s.quiz()), Step::Apply(Command::Answer(true)));
        assert!(matches!(interpret("p", s.quiz()), Step::Reject(_)));
        assert!(matches!(interpret("r", s.quiz()), Step::Reject(_)));
        assert_eq!(interpret("", s.quiz()), Step::Ignore);
        assert!(matches!(interpret("xyz", s.quiz()), Step::Reject(_)));

        s.apply(Command::Answer(true)).unwrap();
        assert!(matches!(interpret("f", s.quiz()), Step::Reject(_)));
        assert_eq!(interpret("n", s.quiz()), Step::Apply(Command::Next));
    }

    #[test]
    fn interpret_after_submit_only_restarts_or_quits() {
        let mut s = session();
        s.apply(Command::Submit).unwrap();
        assert_eq!(interpret("r", s.quiz()), Step::Apply(Command::Restart));
        assert_eq!(interpret("restart", s.quiz()), Step::Apply(Command::Restart));
        assert_eq!(interpret("q", s.quiz()), Step::Quit);
        assert!(matches!(interpret("a", s.quiz()), Step::Reject(_)));
    }

    #[test]
    fn full_game_reaches_results() {
        let mut s = session();
        let out = play(&mut s, "a\nn\nf\nn\na\nr\nq\n");
        assert!(s.quiz().is_submitted());
        assert!(out.contains("Final score:"));
        assert!(out.contains("/3"));
    }

    #[test]
    fn results_refused_until_complete() {
        let mut s = session();
        let out = play(&mut s, "a\nr\nq\n");
        assert!(!s.quiz().is_submitted());
        assert!(out.contains("Answer every bias before viewing results (1/3 answered)."));
    }

    #[test]
    fn restart_after_results() {
        let mut s = session();
        play(&mut s, "a\nn\na\nn\na\nr\nrestart\n");
        assert!(!s.quiz().is_submitted());
        assert_eq!(s.quiz().answered_count(), 0);
        assert_eq!(s.quiz().current_index(), 0);
    }

    #[test]
    fn end_of_input_ends_game() {
        let mut s = session();
        let out = play(&mut s, "a\n");
        assert!(out.contains("Question 1/3"));
        assert_eq!(s.quiz().answered_count(), 1);
    }

    #[test]
    fn restart_without_data_explains_and_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biases.json");
        std::fs::write(&path, BANK).unwrap();
        let mut s =
            QuizSession::start(ClaimLoader::new(10).with_source(FileSource::new(&path))).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut out = Vec::new();
        let mut err_out = Vec::new();
        let err = run(
            &mut s,
            Cursor::new("a\nrestart\nq\n"),
            &mut out,
            &mut err_out,
            ResultsFormat::Text,
        )
        .unwrap_err();

        let help = String::from_utf8(err_out).unwrap();
        assert!(help.contains("Could not find a biases.json"));
        assert!(help.contains(&path.display().to_string()));
        assert!(err
            .downcast_ref::<QuizError>()
            .is_some_and(QuizError::is_no_data));
        assert_eq!(s.quiz().answered_count(), 1);
    }

    #[test]
    fn explain_is_silent_for_other_errors() {
        let mut err_out = Vec::new();
        let err = explain(&mut err_out, QuizError::InvalidConfig("limit".into()));
        assert!(err_out.is_empty());
        assert!(err.to_string().contains("limit"));
    }
}

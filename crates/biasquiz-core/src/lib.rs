//! biasquiz-core — Claim loading, quiz state machine, and scoring.
//!
//! The [`quiz::Quiz`] state machine is the heart of the crate. A
//! [`session::QuizSession`] owns one quiz and maps UI commands onto its
//! transitions; [`loader::ClaimLoader`] produces the shuffled claim list
//! each quiz starts from.

pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod quiz;
pub mod report;
pub mod session;

pub use error::QuizError;
pub use quiz::Quiz;
pub use session::{Command, QuizSession};

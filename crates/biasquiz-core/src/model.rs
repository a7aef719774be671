//! Core data model types for biasquiz.
//!
//! A [`Claim`] is one true/false statement loaded from a question bank. An
//! [`Answer`] is the user's guess for the claim at the same index.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A statement about a cognitive bias, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Short label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// The statement text shown to the user.
    #[serde(default, deserialize_with = "null_as_default")]
    pub definition: String,
    /// Ground truth: the bias is a real, documented phenomenon.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_authentic: bool,
    /// Citation, may be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub reference: String,
    /// Classification label, may be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Claim {
    /// The verdict that matches this claim's ground truth.
    pub fn expected(&self) -> Verdict {
        Verdict::from(self.is_authentic)
    }
}

/// The user's answer to one claim.
///
/// `is_correct` is only ever written together with `value`, through
/// [`Answer::record`], so the two cannot drift apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Answer {
    value: Option<bool>,
    is_correct: Option<bool>,
}

impl Answer {
    /// An answer recording `value` as the guess for `claim`.
    pub fn record(value: bool, claim: &Claim) -> Self {
        Self {
            value: Some(value),
            is_correct: Some(value == claim.is_authentic),
        }
    }

    /// The guess (`true` = authentic), or `None` if unanswered.
    pub fn value(&self) -> Option<bool> {
        self.value
    }

    /// Whether the guess matched the claim, or `None` if unanswered.
    pub fn is_correct(&self) -> Option<bool> {
        self.is_correct
    }

    pub fn is_answered(&self) -> bool {
        self.value.is_some()
    }

    /// The chosen verdict, if any.
    pub fn verdict(&self) -> Option<Verdict> {
        self.value.map(Verdict::from)
    }
}

/// Authentic-or-fake label used when displaying answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Authentic,
    Fake,
}

impl From<bool> for Verdict {
    fn from(authentic: bool) -> Self {
        if authentic {
            Verdict::Authentic
        } else {
            Verdict::Fake
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Authentic => write!(f, "Authentic"),
            Verdict::Fake => write!(f, "Fake"),
        }
    }
}

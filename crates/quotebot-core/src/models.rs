//! Core data models shared by the corpus, the query engine, and the
//! command layer.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single parsed quotation.
///
/// Created once when the corpus is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Quote text, trimmed, with one surrounding `"` stripped from each end.
    pub text: String,
    /// Author name exactly as it appears in the corpus (case preserved).
    pub author: String,
    /// Character count of `text`.
    pub length: usize,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self {
            text,
            author: author.into(),
            length,
        }
    }
}

/// Length category used by the `quotelength` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthBucket {
    /// Fewer than 50 characters.
    Short,
    /// 50 to 150 characters, inclusive.
    Medium,
    /// More than 150 characters.
    Long,
}

impl LengthBucket {
    pub const ALL: [LengthBucket; 3] = [LengthBucket::Short, LengthBucket::Medium, LengthBucket::Long];

    /// Whether a quote of `length` characters falls in this bucket.
    pub fn contains(self, length: usize) -> bool {
        match self {
            LengthBucket::Short => length < 50,
            LengthBucket::Medium => (50..=150).contains(&length),
            LengthBucket::Long => length > 150,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LengthBucket::Short => "short",
            LengthBucket::Medium => "medium",
            LengthBucket::Long => "long",
        }
    }

    /// Human label shown as a command choice.
    pub fn label(self) -> &'static str {
        match self {
            LengthBucket::Short => "Short (under 50 characters)",
            LengthBucket::Medium => "Medium (50-150 characters)",
            LengthBucket::Long => "Long (over 150 characters)",
        }
    }
}

impl fmt::Display for LengthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthBucket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(LengthBucket::Short),
            "medium" => Ok(LengthBucket::Medium),
            "long" => Ok(LengthBucket::Long),
            other => bail!(
                "invalid length bucket: '{}'. Use short, medium, or long.",
                other
            ),
        }
    }
}

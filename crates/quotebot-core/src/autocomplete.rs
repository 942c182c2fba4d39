//! Author-name autocomplete for the `quotebyauthor` command.
//!
//! Results come in three tiers: names starting with the typed text, names
//! containing it elsewhere, then every other author by quote count. The
//! list is cut at [`MAX_CHOICES`], the platform's suggestion limit.

use serde::Serialize;

use crate::corpus::Corpus;

/// Maximum suggestions returned to the platform.
pub const MAX_CHOICES: usize = 25;

/// A suggestion: display label and submitted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub name: String,
    pub value: String,
}

impl Choice {
    fn author(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: name.to_string(),
        }
    }
}

/// Ranked author suggestions for the partial input `typed`.
pub fn complete_author(corpus: &Corpus, typed: &str) -> Vec<Choice> {
    let needle = typed.to_lowercase();

    let mut starts: Vec<&str> = Vec::new();
    let mut contains: Vec<&str> = Vec::new();
    let mut rest: Vec<(&str, usize)> = Vec::new();

    for (name, count) in corpus.author_counts() {
        let lower = name.to_lowercase();
        if lower.starts_with(&needle) {
            starts.push(name);
        } else if lower.contains(&needle) {
            contains.push(name);
        } else {
            rest.push((name, count));
        }
    }

    starts.sort_unstable();
    contains.sort_unstable();
    rest.sort_by(|a, b| b.1.cmp(&a.1));

    starts
        .into_iter()
        .chain(contains)
        .chain(rest.into_iter().map(|(name, _)| name))
        .take(MAX_CHOICES)
        .map(Choice::author)
        .collect()
}

//! Query engine over a [`Corpus`].
//!
//! Every function here is a read-only scan of the corpus. Functions that
//! choose randomly come in two forms: a convenience form using
//! `rand::thread_rng()` and a `_with_rng` form taking any [`Rng`], which
//! tests drive with a seeded `StdRng`.
//!
//! | Function | Command |
//! |----------|---------|
//! | [`random_quote`] | `quote` |
//! | [`daily_quote`] | `dailyquote` |
//! | [`find_author`] / [`suggest_authors`] | `quotebyauthor` |
//! | [`search`] | `searchquote` |
//! | [`themed_quote`] | `motivational`, `wisdom` |
//! | [`quote_by_length`] | `quotelength` |
//! | [`random_author`] | `randomauthor` |

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::fuzzy::levenshtein;
use crate::models::{LengthBucket, Quote};

/// Maximum number of "did you mean" authors.
pub const MAX_SUGGESTIONS: usize = 3;

/// Maximum edit distance for an author to count as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Outcome of a filtered random pick.
#[derive(Debug, Clone, Copy)]
pub struct Pick<'a> {
    /// The chosen quote, `None` only when nothing could be chosen.
    pub quote: Option<&'a Quote>,
    /// Size of the filtered set the pick was drawn from.
    pub matched: usize,
    /// True when the filter matched nothing and the pick came from the whole corpus.
    pub fallback: bool,
}

/// An author resolved from a search string, with all their quotes.
#[derive(Debug, Clone)]
pub struct AuthorMatch<'a> {
    /// Canonical (exact-cased) author key.
    pub author: &'a str,
    pub quotes: Vec<&'a Quote>,
}

/// Pick one element uniformly at random.
pub fn choose<'a, R: Rng + ?Sized>(items: &[&'a Quote], rng: &mut R) -> Option<&'a Quote> {
    if items.is_empty() {
        None
    } else {
        Some(items[rng.gen_range(0..items.len())])
    }
}

// ============ Random ============

pub fn random_quote(corpus: &Corpus) -> Option<&Quote> {
    random_quote_with_rng(corpus, &mut rand::thread_rng())
}

/// Uniformly random quote over the whole corpus.
pub fn random_quote_with_rng<'a, R: Rng + ?Sized>(corpus: &'a Corpus, rng: &mut R) -> Option<&'a Quote> {
    if corpus.is_empty() {
        None
    } else {
        corpus.get(rng.gen_range(0..corpus.len()))
    }
}

// ============ Daily ============

/// Numeric contribution of a scope id (e.g. a guild id) to the daily seed.
///
/// The last four characters are read as base-16, stopping at the first
/// non-hex character; no leading hex digits yields 0.
pub fn scope_hash(scope: &str) -> u64 {
    let chars: Vec<char> = scope.chars().collect();
    let tail = &chars[chars.len().saturating_sub(4)..];
    tail.iter()
        .map_while(|c| c.to_digit(16))
        .fold(0u64, |acc, d| acc * 16 + d as u64)
}

/// Index of the daily quote for `date` and an optional scope, or `None` when
/// `len` is zero.
pub fn daily_index(date: NaiveDate, scope: Option<&str>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let mut seed = date.day() as u64 + date.month0() as u64 * 31;
    if let Some(scope) = scope {
        seed += scope_hash(scope);
    }
    Some((seed % len as u64) as usize)
}

/// The quote of the day. Same date and scope always give the same quote.
pub fn daily_quote<'a>(corpus: &'a Corpus, date: NaiveDate, scope: Option<&str>) -> Option<&'a Quote> {
    daily_index(date, scope, corpus.len()).and_then(|i| corpus.get(i))
}

// ============ Authors ============

/// Resolve a search string to the first author key containing it,
/// case-insensitively, in author-index order.
pub fn find_author<'a>(corpus: &'a Corpus, search: &str) -> Option<AuthorMatch<'a>> {
    let needle = search.to_lowercase();
    let author = corpus
        .author_names()
        .find(|name| name.to_lowercase().contains(&needle))?;
    Some(AuthorMatch {
        author,
        quotes: corpus.quotes_by(author),
    })
}

/// Up to [`MAX_SUGGESTIONS`] authors resembling `search`, in index order.
///
/// An author qualifies if its lowercase name contains the first three
/// characters of the lowercase search term, or lies within edit distance 3
/// of it.
pub fn suggest_authors<'a>(corpus: &'a Corpus, search: &str) -> Vec<&'a str> {
    let needle = search.to_lowercase();
    let prefix: String = needle.chars().take(3).collect();
    corpus
        .author_names()
        .filter(|name| {
            let lower = name.to_lowercase();
            lower.contains(&prefix) || levenshtein(&lower, &needle) <= MAX_SUGGESTION_DISTANCE
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Random author and all of their quotes.
pub fn random_author(corpus: &Corpus) -> Option<AuthorMatch<'_>> {
    random_author_with_rng(corpus, &mut rand::thread_rng())
}

pub fn random_author_with_rng<'a, R: Rng + ?Sized>(corpus: &'a Corpus, rng: &mut R) -> Option<AuthorMatch<'a>> {
    let count = corpus.author_count();
    if count == 0 {
        return None;
    }
    let author = corpus.author_names().nth(rng.gen_range(0..count))?;
    Some(AuthorMatch {
        author,
        quotes: corpus.quotes_by(author),
    })
}

// ============ Keyword search ============

/// Quotes matching every whitespace-separated keyword.
///
/// Each keyword must appear, case-insensitively, in the quote text or the
/// author name. Results keep corpus order. No keywords means no results.
pub fn search<'a>(corpus: &'a Corpus, keywords: &str) -> Vec<&'a Quote> {
    let lowered = keywords.to_lowercase();
    let terms: Vec<&str> = lowered.split_whitespace().collect();
    if terms.is_empty() {
        return Vec::new();
    }
    corpus
        .quotes()
        .iter()
        .filter(|q| {
            let text = q.text.to_lowercase();
            let author = q.author.to_lowercase();
            terms
                .iter()
                .all(|t| text.contains(t) || author.contains(t))
        })
        .collect()
}

// ============ Themes ============

/// A thematic filter: keyword and author-name fragments, matched
/// case-insensitively as substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
}

impl Theme {
    /// Build a theme; fragments are lowercased.
    pub fn new<K, A>(keywords: K, authors: A) -> Self
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            keywords: keywords.into_iter().map(|k| k.as_ref().to_lowercase()).collect(),
            authors: authors.into_iter().map(|a| a.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn motivational() -> Self {
        Self::new(
            [
                "success", "achieve", "dream", "goal", "work", "future", "win", "believe", "possible",
            ],
            ["steve jobs", "disney"],
        )
    }

    pub fn wisdom() -> Self {
        Self::new(
            [
                "wisdom",
                "learn",
                "knowledge",
                "understand",
                "truth",
                "life",
                "experience",
            ],
            ["plato", "aristotle", "confucius", "gandhi", "einstein", "buddha"],
        )
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        let text = quote.text.to_lowercase();
        let author = quote.author.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
            || self.authors.iter().any(|a| author.contains(a.as_str()))
    }
}

pub fn themed_quote<'a>(corpus: &'a Corpus, theme: &Theme) -> Pick<'a> {
    themed_quote_with_rng(corpus, theme, &mut rand::thread_rng())
}

/// Random quote matching `theme`, falling back to the whole corpus when
/// nothing matches.
pub fn themed_quote_with_rng<'a, R: Rng + ?Sized>(corpus: &'a Corpus, theme: &Theme, rng: &mut R) -> Pick<'a> {
    let matching: Vec<&Quote> = corpus.quotes().iter().filter(|q| theme.matches(q)).collect();
    if matching.is_empty() {
        return Pick {
            quote: random_quote_with_rng(corpus, rng),
            matched: 0,
            fallback: true,
        };
    }
    Pick {
        quote: choose(&matching, rng),
        matched: matching.len(),
        fallback: false,
    }
}

// ============ Length ============

pub fn quote_by_length(corpus: &Corpus, bucket: LengthBucket) -> Pick<'_> {
    quote_by_length_with_rng(corpus, bucket, &mut rand::thread_rng())
}

/// Random quote within a length bucket. An empty bucket yields no quote
/// and `matched == 0`; the caller decides whether to fall back.
pub fn quote_by_length_with_rng<'a, R: Rng + ?Sized>(
    corpus: &'a Corpus,
    bucket: LengthBucket,
    rng: &mut R,
) -> Pick<'a> {
    let matching: Vec<&Quote> = corpus
        .quotes()
        .iter()
        .filter(|q| bucket.contains(q.length))
        .collect();
    Pick {
        quote: choose(&matching, rng),
        matched: matching.len(),
        fallback: false,
    }
}

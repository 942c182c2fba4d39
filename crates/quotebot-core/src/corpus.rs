//! Corpus parsing and the author index.
//!
//! A [`Corpus`] is built once from the raw text of the quotes file and is
//! immutable afterwards. It holds the quotes in file order plus an index
//! from author name to that author's quotes.
//!
//! # Line Format
//!
//! ```text
//! "Be the change you wish to see." - Mahatma Gandhi
//! ```
//!
//! A line qualifies when it contains `" - "` and does not start with `"- "`.
//! The line is split at the **last** separator, so `A - B - C` yields the
//! text `A - B` and the author `C`. Lines that do not qualify are skipped.

use std::collections::HashMap;

use crate::models::Quote;

/// Separator between quote text and author.
const SEPARATOR: &str = " - ";

/// Text of this many characters or fewer is rejected.
const MIN_TEXT_CHARS: usize = 5;

/// One author's slice of the corpus, in corpus order.
#[derive(Debug, Clone)]
struct AuthorBucket {
    name: String,
    quotes: Vec<usize>,
}

/// The parsed quote collection and its author index.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    quotes: Vec<Quote>,
    /// Buckets in order of each author's first appearance.
    authors: Vec<AuthorBucket>,
    slots: HashMap<String, usize>,
    skipped: usize,
}

/// Split a line into trimmed `(text, author)` at the last separator.
///
/// No length or quote-mark handling happens here; see [`parse_line`].
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.starts_with("- ") {
        return None;
    }
    let split = line.rfind(SEPARATOR)?;
    Some((
        line[..split].trim(),
        line[split + SEPARATOR.len()..].trim(),
    ))
}

/// Parse a single corpus line into a [`Quote`].
///
/// Returns `None` for lines that are blank, lack the separator, start with
/// `"- "`, have an empty author, or whose text is too short.
pub fn parse_line(line: &str) -> Option<Quote> {
    let (text, author) = split_line(line)?;

    let text = text.strip_prefix('"').unwrap_or(text);
    let text = text.strip_suffix('"').unwrap_or(text);

    if text.chars().count() <= MIN_TEXT_CHARS || author.is_empty() {
        return None;
    }

    Some(Quote::new(text, author))
}

impl Corpus {
    /// An empty corpus. Every query against it reports no quotes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse raw corpus text, one candidate quote per line.
    pub fn parse(content: &str) -> Self {
        let mut corpus = Self::empty();
        for line in content.lines() {
            match parse_line(line) {
                Some(quote) => corpus.push(quote),
                None if !line.trim().is_empty() => corpus.skipped += 1,
                None => {}
            }
        }
        corpus
    }

    /// Build a corpus from already-parsed quotes, preserving their order.
    pub fn from_quotes(quotes: impl IntoIterator<Item = Quote>) -> Self {
        let mut corpus = Self::empty();
        for quote in quotes {
            corpus.push(quote);
        }
        corpus
    }

    fn push(&mut self, quote: Quote) {
        let index = self.quotes.len();
        match self.slots.get(&quote.author) {
            Some(&slot) => self.authors[slot].quotes.push(index),
            None => {
                self.slots.insert(quote.author.clone(), self.authors.len());
                self.authors.push(AuthorBucket {
                    name: quote.author.clone(),
                    quotes: vec![index],
                });
            }
        }
        self.quotes.push(quote);
    }

    /// All quotes in file order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    /// Number of non-blank lines rejected during parsing.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    /// Number of distinct authors.
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    /// Author names in order of first appearance.
    pub fn author_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.authors.iter().map(|b| b.name.as_str())
    }

    /// Author names paired with their quote counts, in order of first appearance.
    pub fn author_counts(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.authors.iter().map(|b| (b.name.as_str(), b.quotes.len()))
    }

    /// Quotes by an exact (case-sensitive) author name.
    pub fn quotes_by(&self, author: &str) -> Vec<&Quote> {
        self.slots
            .get(author)
            .map(|&slot| {
                self.authors[slot]
                    .quotes
                    .iter()
                    .map(|&i| &self.quotes[i])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of quotes by an exact author name.
    pub fn quote_count(&self, author: &str) -> usize {
        self.slots
            .get(author)
            .map(|&slot| self.authors[slot].quotes.len())
            .unwrap_or(0)
    }

    /// Zero-based corpus position of a quote borrowed from this corpus.
    ///
    /// Identity is by address, so duplicate quotes keep distinct positions.
    pub fn position_of(&self, quote: &Quote) -> Option<usize> {
        self.quotes.iter().position(|q| std::ptr::eq(q, quote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_text() {
        let q = parse_line("\"Be the change.\" - Gandhi").unwrap();
        assert_eq!(q.text, "Be the change.");
        assert_eq!(q.author, "Gandhi");
        assert_eq!(q.length, 14);
    }

    #[test]
    fn drops_leading_dash_line() {
        assert!(parse_line("- Nobody").is_none());
        assert!(parse_line("- Nobody said - this").is_none());
    }

    #[test]
    fn drops_short_text() {
        assert!(parse_line("Hi - Bo").is_none());
        // Exactly five characters after stripping quotes is still too short.
        assert!(parse_line("\"Hello\" - Bo").is_none());
        assert!(parse_line("Hello! - Bo").is_some());
    }

    #[test]
    fn splits_at_last_separator() {
        assert_eq!(split_line("A - B - C"), Some(("A - B", "C")));
        // "A - B" is five characters, so the full parse rejects it.
        assert!(parse_line("A - B - C").is_none());
        let q = parse_line("Alpha - Beta - Gamma").unwrap();
        assert_eq!(q.text, "Alpha - Beta");
        assert_eq!(q.author, "Gamma");
    }

    #[test]
    fn strips_quotes_independently() {
        let q = parse_line("\"Unbalanced opening - Someone").unwrap();
        assert_eq!(q.text, "Unbalanced opening");
        let q = parse_line("Unbalanced closing\" - Someone").unwrap();
        assert_eq!(q.text, "Unbalanced closing");
        let q = parse_line("\"\"Double wrapped\"\" - Someone").unwrap();
        assert_eq!(q.text, "\"Double wrapped\"");
    }

    #[test]
    fn rejects_missing_separator_and_empty_author() {
        assert!(parse_line("No separator here at all").is_none());
        assert!(parse_line("Some text -Author").is_none());
        assert!(parse_line("Trailing separator - ").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn builds_author_index_in_order() {
        let corpus = Corpus::parse(
            "First quote here - Ann\n\
             \n\
             garbage line\n\
             Second quote here - Bob\n\
             Third quote here - Ann\n\
             Fourth quote here - ann\n",
        );
        assert_eq!(corpus.len(), 4);
        assert_eq!(corpus.skipped_lines(), 1);
        let names: Vec<&str> = corpus.author_names().collect();
        assert_eq!(names, vec!["Ann", "Bob", "ann"]);
        let ann: Vec<&str> = corpus.quotes_by("Ann").iter().map(|q| q.text.as_str()).collect();
        assert_eq!(ann, vec!["First quote here", "Third quote here"]);
        assert_eq!(corpus.quote_count("ann"), 1);
        assert_eq!(corpus.quote_count("Nobody"), 0);
    }

    #[test]
    fn every_quote_in_exactly_one_bucket() {
        let corpus = Corpus::parse(
            "One quote text - A\nTwo quote text - B\nThree quote text - A\nOne quote text - A\n",
        );
        let total: usize = corpus.author_counts().map(|(_, n)| n).sum();
        assert_eq!(total, corpus.len());
        for q in corpus.quotes() {
            assert!(corpus
                .quotes_by(&q.author)
                .iter()
                .any(|b| std::ptr::eq(*b, q)));
        }
    }

    #[test]
    fn position_distinguishes_duplicates() {
        let corpus = Corpus::parse("Same text again - A\nSame text again - A\n");
        let second = &corpus.quotes()[1];
        assert_eq!(corpus.position_of(second), Some(1));
        let foreign = Quote::new("Same text again", "A");
        assert_eq!(corpus.position_of(&foreign), None);
    }

    #[test]
    fn handles_crlf_lines() {
        let corpus = Corpus::parse("Windows line ending - Ann\r\nAnother windows line - Bob\r\n");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.quotes()[0].author, "Ann");
    }
}

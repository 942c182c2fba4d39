//! Aggregate statistics over the corpus.

use serde::Serialize;

use crate::corpus::Corpus;
use crate::models::Quote;

/// Number of authors listed in [`CorpusStats::top_authors`].
pub const TOP_AUTHORS: usize = 5;

/// Author name with quote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCount {
    pub name: String,
    pub quotes: usize,
}

/// Summary used by the `quotestats` command.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub total_quotes: usize,
    pub total_authors: usize,
    /// Mean quote length in characters, rounded to the nearest integer.
    pub average_length: usize,
    /// Most prolific authors, ties in author-index order.
    pub top_authors: Vec<AuthorCount>,
    /// First shortest quote in corpus order.
    pub shortest: Option<Quote>,
    /// First longest quote in corpus order.
    pub longest: Option<Quote>,
}

impl CorpusStats {
    pub fn compute(corpus: &Corpus) -> Self {
        let quotes = corpus.quotes();

        let total_length: usize = quotes.iter().map(|q| q.length).sum();
        let average_length = if quotes.is_empty() {
            0
        } else {
            (total_length as f64 / quotes.len() as f64).round() as usize
        };

        // Stable sort keeps index order among equal counts.
        let mut counts: Vec<(&str, usize)> = corpus.author_counts().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        let top_authors = counts
            .into_iter()
            .take(TOP_AUTHORS)
            .map(|(name, quotes)| AuthorCount {
                name: name.to_string(),
                quotes,
            })
            .collect();

        let mut shortest: Option<&Quote> = None;
        let mut longest: Option<&Quote> = None;
        for q in quotes {
            if shortest.map_or(true, |s| q.length < s.length) {
                shortest = Some(q);
            }
            if longest.map_or(true, |l| q.length > l.length) {
                longest = Some(q);
            }
        }

        Self {
            total_quotes: quotes.len(),
            total_authors: corpus.author_count(),
            average_length,
            top_authors,
            shortest: shortest.cloned(),
            longest: longest.cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_shortest_longest() {
        let corpus = Corpus::from_quotes([
            Quote::new("x".repeat(20), "B"),
            Quote::new("y".repeat(10), "A"),
            Quote::new("z".repeat(30), "C"),
        ]);
        let stats = CorpusStats::compute(&corpus);
        assert_eq!(stats.total_quotes, 3);
        assert_eq!(stats.total_authors, 3);
        assert_eq!(stats.average_length, 20);
        assert_eq!(stats.shortest.unwrap().length, 10);
        assert_eq!(stats.longest.unwrap().length, 30);
    }

    #[test]
    fn ties_keep_first_occurrence() {
        let corpus = Corpus::from_quotes([
            Quote::new("first of ten", "A"),
            Quote::new("other of ten", "B"),
        ]);
        let stats = CorpusStats::compute(&corpus);
        assert_eq!(stats.shortest.unwrap().author, "A");
        assert_eq!(stats.longest.unwrap().author, "A");
    }

    #[test]
    fn average_rounds_to_nearest() {
        let corpus = Corpus::from_quotes([
            Quote::new("a".repeat(10), "A"),
            Quote::new("a".repeat(11), "A"),
        ]);
        // 10.5 rounds half away from zero.
        assert_eq!(CorpusStats::compute(&corpus).average_length, 11);
    }

    #[test]
    fn top_authors_sorted_with_stable_ties() {
        let mut quotes = Vec::new();
        for (author, n) in [("Ann", 1), ("Bob", 3), ("Cy", 1), ("Di", 2), ("Ed", 1), ("Fay", 1)] {
            for i in 0..n {
                quotes.push(Quote::new(format!("quote number {}", i), author));
            }
        }
        let stats = CorpusStats::compute(&Corpus::from_quotes(quotes));
        let names: Vec<&str> = stats.top_authors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Di", "Ann", "Cy", "Ed"]);
        assert_eq!(stats.top_authors[0].quotes, 3);
    }

    #[test]
    fn empty_corpus() {
        let stats = CorpusStats::compute(&Corpus::empty());
        assert_eq!(stats.total_quotes, 0);
        assert_eq!(stats.average_length, 0);
        assert!(stats.top_authors.is_empty());
        assert!(stats.shortest.is_none());
    }
}

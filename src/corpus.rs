//! Loading the quotes file into a [`Corpus`].
//!
//! The corpus is read once at startup. A missing or unreadable file is not
//! fatal: [`load_corpus`] logs the failure and returns an empty corpus, so
//! every command answers "no quotes available" instead of the process
//! refusing to start. [`try_load_corpus`] surfaces the error for callers
//! that want it, such as `quotebot check`.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};

use quotebot_core::Corpus;

/// Read and parse the quotes file, returning any I/O error.
pub fn try_load_corpus(path: &Path) -> Result<Corpus> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read quotes file: {}", path.display()))?;

    let corpus = Corpus::parse(&content);
    info!(
        quotes = corpus.len(),
        authors = corpus.author_count(),
        path = %path.display(),
        "Loaded quotes"
    );
    if corpus.skipped_lines() > 0 {
        debug!(skipped = corpus.skipped_lines(), "Skipped malformed lines");
    }
    Ok(corpus)
}

/// Read and parse the quotes file; on failure, log and return an empty corpus.
pub fn load_corpus(path: &Path) -> Corpus {
    match try_load_corpus(path) {
        Ok(corpus) => corpus,
        Err(e) => {
            error!("Error loading quotes: {:#}", e);
            Corpus::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.txt");
        fs::write(
            &path,
            "\"Be the change you wish to see.\" - Mahatma Gandhi\n- Nobody\nHi - Bo\n",
        )
        .unwrap();

        let corpus = try_load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.skipped_lines(), 2);
        assert_eq!(corpus.quotes()[0].author, "Mahatma Gandhi");
    }

    #[test]
    fn missing_file_yields_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        assert!(try_load_corpus(&path).is_err());
        assert!(load_corpus(&path).is_empty());
    }
}

//! Plain-text rendering of command replies for the terminal.
//!
//! The HTTP server returns [`Reply`] as JSON; the CLI prints it through
//! [`render`], or as JSON with `--json`.

use std::fmt::Write;

use quotebot_core::pagination::AuthorPage;
use quotebot_core::stats::CorpusStats;

use crate::commands::{QuoteCard, Reply};

/// Render a reply as human-readable text (no trailing newline).
pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::Quote(card) => render_quote(card),
        Reply::Stats { title, stats } => render_stats(title, stats),
        Reply::Authors { title, page } => render_authors(title, page),
        Reply::NotFound {
            message,
            suggestions,
        } => {
            if suggestions.is_empty() {
                message.clone()
            } else {
                format!("{}\nDid you mean: {}?", message, suggestions.join(", "))
            }
        }
        Reply::Unavailable { message } => message.clone(),
    }
}

fn render_quote(card: &QuoteCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", card.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "  \"{}\"", card.text);
    let _ = writeln!(out, "    - {}", card.author);
    let _ = writeln!(out);
    if card.fallback {
        let _ = writeln!(out, "(no matching quotes, showing a random one)");
    }
    out.push_str(&card.footer());
    out
}

fn render_stats(title: &str, stats: &CorpusStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    let _ = writeln!(out);
    let _ = writeln!(out, "  Total quotes:    {}", stats.total_quotes);
    let _ = writeln!(out, "  Total authors:   {}", stats.total_authors);
    let _ = writeln!(out, "  Average length:  {} characters", stats.average_length);

    if !stats.top_authors.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Top authors:");
        for (i, a) in stats.top_authors.iter().enumerate() {
            let _ = writeln!(out, "    {}. {} ({} quotes)", i + 1, a.name, a.quotes);
        }
    }

    if let Some(q) = &stats.shortest {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Shortest: \"{}\" - {} ({} chars)", q.text, q.author, q.length);
    }
    if let Some(q) = &stats.longest {
        let _ = writeln!(out, "  Longest:  \"{}\" - {} ({} chars)", q.text, q.author, q.length);
    }
    out.trim_end().to_string()
}

fn render_authors(title: &str, page: &AuthorPage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out);
    if page.entries.is_empty() {
        let _ = writeln!(out, "  (no authors)");
    }
    for (i, entry) in page.entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}. {} ({})",
            page.first_ordinal() + i,
            entry.name,
            entry.quotes
        );
    }
    let _ = writeln!(out);
    let _ = write!(
        out,
        "Showing {}-{} of {} authors | Page {} of {}",
        page.first_ordinal(),
        page.last_ordinal(),
        page.total_authors,
        page.page + 1,
        page.total_pages
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandContext, CommandRegistry};
    use crate::config::ThemesConfig;
    use quotebot_core::{Corpus, Quote};
    use serde_json::json;
    use std::sync::Arc;

    fn ctx() -> CommandContext {
        let corpus = Corpus::from_quotes([
            Quote::new("Stay hungry, stay foolish.", "Steve Jobs"),
            Quote::new("Know thyself, said the oracle.", "Socrates"),
        ]);
        CommandContext::new(Arc::new(corpus), ThemesConfig::default())
    }

    #[test]
    fn quote_shows_text_author_and_footer() {
        let reply = CommandRegistry::with_builtins()
            .dispatch("quotebyauthor", &json!({"author": "jobs"}), &ctx())
            .unwrap();
        let text = render(&reply);
        assert!(text.starts_with("📖 Quote by Steve Jobs"));
        assert!(text.contains("\"Stay hungry, stay foolish.\""));
        assert!(text.ends_with("Quote 1 of 2"));
    }

    #[test]
    fn not_found_lists_suggestions() {
        let reply = Reply::NotFound {
            message: "No quotes found for author: \"Sokrates\"".into(),
            suggestions: vec!["Socrates".into()],
        };
        assert!(render(&reply).ends_with("Did you mean: Socrates?"));
    }

    #[test]
    fn stats_and_authors() {
        let registry = CommandRegistry::with_builtins();
        let stats = render(&registry.dispatch("quotestats", &json!({}), &ctx()).unwrap());
        assert!(stats.contains("Total quotes:    2"));
        assert!(stats.contains("Top authors:"));

        let authors = render(&registry.dispatch("authorlist", &json!({}), &ctx()).unwrap());
        assert!(authors.contains("1. Socrates (1)"));
        assert!(authors.ends_with("Showing 1-2 of 2 authors | Page 1 of 1"));
    }
}

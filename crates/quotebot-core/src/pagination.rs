//! Paginated author list.
//!
//! Authors are sorted ascending and cut into pages of [`PAGE_SIZE`]. The
//! page number is explicit state: callers pass the page they are showing
//! plus a [`PageNav`] action, and every [`AuthorPage`] carries the target
//! page of each navigation button so a client never has to parse it back
//! out of rendered text.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::corpus::Corpus;
use crate::stats::AuthorCount;

/// Authors per page.
pub const PAGE_SIZE: usize = 20;

/// Navigation action on the author list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
}

impl PageNav {
    /// Target page when applying this action on `current` out of `total_pages`.
    pub fn apply(self, current: usize, total_pages: usize) -> usize {
        let last = total_pages.saturating_sub(1);
        match self {
            PageNav::First => 0,
            PageNav::Previous => current.saturating_sub(1).min(last),
            PageNav::Next => (current + 1).min(last),
            PageNav::Last => last,
        }
    }
}

impl FromStr for PageNav {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(PageNav::First),
            "previous" | "prev" => Ok(PageNav::Previous),
            "next" => Ok(PageNav::Next),
            "last" => Ok(PageNav::Last),
            other => bail!(
                "invalid page navigation: '{}'. Use first, previous, next, or last.",
                other
            ),
        }
    }
}

/// Target page for each navigation button, computed from the shown page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub first: usize,
    pub previous: usize,
    pub next: usize,
    pub last: usize,
}

/// One page of the sorted author list.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorPage {
    /// Zero-based page index.
    pub page: usize,
    pub total_pages: usize,
    pub total_authors: usize,
    pub entries: Vec<AuthorCount>,
    pub controls: PageControls,
}

impl AuthorPage {
    /// 1-based index of the first entry on this page (0 when empty).
    pub fn first_ordinal(&self) -> usize {
        if self.entries.is_empty() {
            0
        } else {
            self.page * PAGE_SIZE + 1
        }
    }

    /// 1-based index of the last entry on this page.
    pub fn last_ordinal(&self) -> usize {
        self.page * PAGE_SIZE + self.entries.len()
    }
}

/// Number of pages for `authors` entries; an empty list still has one page.
pub fn total_pages(authors: usize) -> usize {
    authors.div_ceil(PAGE_SIZE).max(1)
}

/// Page `page` of the author list, clamped to the last page.
pub fn author_page(corpus: &Corpus, page: usize) -> AuthorPage {
    let mut authors: Vec<(&str, usize)> = corpus.author_counts().collect();
    authors.sort_by(|a, b| a.0.cmp(b.0));

    let total_authors = authors.len();
    let total_pages = total_pages(total_authors);
    let page = page.min(total_pages - 1);

    let entries = authors
        .into_iter()
        .skip(page * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(|(name, quotes)| AuthorCount {
            name: name.to_string(),
            quotes,
        })
        .collect();

    AuthorPage {
        page,
        total_pages,
        total_authors,
        entries,
        controls: PageControls {
            first: PageNav::First.apply(page, total_pages),
            previous: PageNav::Previous.apply(page, total_pages),
            next: PageNav::Next.apply(page, total_pages),
            last: PageNav::Last.apply(page, total_pages),
        },
    }
}

/// Apply a navigation action to the currently shown page and return the result.
pub fn navigate(corpus: &Corpus, current: usize, nav: PageNav) -> AuthorPage {
    let total = total_pages(corpus.author_count());
    author_page(corpus, nav.apply(current.min(total - 1), total))
}

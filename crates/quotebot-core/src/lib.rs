//! # Quotebot Core
//!
//! Pure logic for Quotebot: the quote model, the corpus parser and author
//! index, and every query the bot answers (random, daily, by author, keyword
//! search, themes, length buckets, statistics, the paginated author list and
//! author autocomplete).
//!
//! This crate performs no filesystem or network I/O and holds no global
//! state. The application reads the corpus file, builds a [`Corpus`] once,
//! and shares it by reference with every query.

pub mod autocomplete;
pub mod corpus;
pub mod fuzzy;
pub mod models;
pub mod pagination;
pub mod query;
pub mod stats;

pub use corpus::Corpus;
pub use models::{LengthBucket, Quote};

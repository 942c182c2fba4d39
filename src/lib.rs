//! # Quotebot
//!
//! An inspirational-quote bot backed by a plain-text corpus.
//!
//! The corpus file holds one `"text" - Author` line per quote. It is parsed
//! once at startup into an immutable [`quotebot_core::Corpus`] with an author
//! index, and every slash command is answered from that in-memory index.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ quotes.txt  │──▶│ Corpus +     │──▶│ CommandRegistry  │
//! │             │   │ author index │   │ (10 commands)    │
//! └─────────────┘   └──────────────┘   └────────┬─────────┘
//!                                               │
//!                               ┌───────────────┤
//!                               ▼               ▼
//!                          ┌──────────┐   ┌──────────┐
//!                          │   CLI    │   │   HTTP   │
//!                          └──────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! quotebot check                 # validate config and corpus
//! quotebot quote                 # random quote
//! quotebot author gandhi         # quote by author
//! quotebot serve                 # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`corpus`] | Loading the quotes file |
//! | [`commands`] | Slash commands and their registry |
//! | [`render`] | Terminal rendering of replies |
//! | [`server`] | HTTP server |
//! | [`keepalive`] | Periodic self-ping |

pub mod commands;
pub mod config;
pub mod corpus;
pub mod keepalive;
pub mod render;
pub mod server;

//! Slash commands and their registry.
//!
//! Every user-facing command is a [`Command`] trait object held in a
//! [`CommandRegistry`]. The CLI and the HTTP server both dispatch through
//! the registry, so a command behaves identically on either surface.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │             CommandRegistry              │
//! │  quote  dailyquote  quotebyauthor  ...   │
//! └──────────────┬───────────────────────────┘
//!                ▼
//!      execute(params, CommandContext) → Reply
//!                │
//!        ┌───────┴────────┐
//!        ▼                ▼
//!   render() (CLI)   Json (server)
//! ```
//!
//! Commands never fail on an empty corpus or an empty result; those are
//! ordinary [`Reply`] variants. Errors are reserved for bad arguments
//! (missing required option, unknown length bucket).

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use quotebot_core::autocomplete::{complete_author, Choice};
use quotebot_core::pagination::{author_page, navigate, AuthorPage, PageNav};
use quotebot_core::query::{self, Theme};
use quotebot_core::stats::CorpusStats;
use quotebot_core::{Corpus, LengthBucket, Quote};

use crate::config::ThemesConfig;

// ═══════════════════════════════════════════════════════════════════════
// Command definitions
// ═══════════════════════════════════════════════════════════════════════

/// Value type of a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    String,
    Integer,
}

/// A fixed choice offered for an option.
#[derive(Debug, Clone, Serialize)]
pub struct OptionChoice {
    pub name: String,
    pub value: String,
}

/// A user-facing option of a slash command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub description: String,
    pub required: bool,
    pub autocomplete: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
}

impl CommandOption {
    fn string(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: OptionKind::String,
            description: description.to_string(),
            required: false,
            autocomplete: false,
            choices: Vec::new(),
        }
    }

    fn integer(name: &str, description: &str) -> Self {
        Self {
            kind: OptionKind::Integer,
            ..Self::string(name, description)
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn with_autocomplete(mut self) -> Self {
        self.autocomplete = true;
        self
    }

    fn with_choices(mut self, choices: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        self.choices = choices
            .into_iter()
            .map(|(name, value)| OptionChoice {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect();
        self
    }
}

/// Registration payload for one command, as served by `GET /commands/list`.
#[derive(Debug, Clone, Serialize)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
}

// ═══════════════════════════════════════════════════════════════════════
// Replies
// ═══════════════════════════════════════════════════════════════════════

/// A quote ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteCard {
    pub title: String,
    pub text: String,
    pub author: String,
    /// One-based position in the corpus.
    pub position: usize,
    pub total: usize,
    /// Size of the filtered set the quote was drawn from, when filtered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<usize>,
    /// The filter matched nothing and the quote came from the whole corpus.
    pub fallback: bool,
}

impl QuoteCard {
    fn new(title: impl Into<String>, quote: &Quote, corpus: &Corpus) -> Self {
        Self {
            title: title.into(),
            text: quote.text.clone(),
            author: quote.author.clone(),
            position: corpus.position_of(quote).map_or(0, |p| p + 1),
            total: corpus.len(),
            matched: None,
            fallback: false,
        }
    }

    fn matched(mut self, matched: usize) -> Self {
        self.matched = Some(matched);
        self
    }

    fn fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn footer(&self) -> String {
        format!("Quote {} of {}", self.position, self.total)
    }
}

/// The result of executing a command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Quote(QuoteCard),
    Stats {
        title: String,
        stats: CorpusStats,
    },
    Authors {
        title: String,
        page: AuthorPage,
    },
    /// A lookup or filter found nothing.
    NotFound {
        message: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        suggestions: Vec<String>,
    },
    /// The corpus is empty.
    Unavailable { message: String },
}

const NO_QUOTES: &str = "No quotes available at the moment.";

fn unavailable(message: &str) -> Reply {
    Reply::Unavailable {
        message: message.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Command trait and context
// ═══════════════════════════════════════════════════════════════════════

/// A slash command the bot answers.
pub trait Command: Send + Sync {
    /// Command name as registered with the platform (e.g. `"quotebyauthor"`).
    fn name(&self) -> &str;

    /// One-line description shown in the platform's command picker.
    fn description(&self) -> &str;

    /// User-facing options. Defaults to none.
    fn options(&self) -> Vec<CommandOption> {
        Vec::new()
    }

    /// Run the command. `params` is a JSON object of option values plus any
    /// interaction context (`guild_id`, paging state).
    fn execute(&self, params: &Value, ctx: &CommandContext) -> Result<Reply>;

    /// Suggestions for a partially typed option value.
    fn autocomplete(&self, _option: &str, _value: &str, _ctx: &CommandContext) -> Vec<Choice> {
        Vec::new()
    }

    fn info(&self) -> CommandInfo {
        CommandInfo {
            name: self.name().to_string(),
            description: self.description().to_string(),
            options: self.options(),
        }
    }
}

/// Read-only state shared by every command invocation.
#[derive(Clone)]
pub struct CommandContext {
    corpus: Arc<Corpus>,
    themes: Arc<ThemesConfig>,
    date: Option<NaiveDate>,
}

impl CommandContext {
    pub fn new(corpus: Arc<Corpus>, themes: ThemesConfig) -> Self {
        Self {
            corpus,
            themes: Arc::new(themes),
            date: None,
        }
    }

    /// Pin "today" for the daily quote instead of the local calendar date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn required_str<'a>(params: &'a Value, name: &str) -> Result<&'a str> {
    match params.get(name).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim()),
        _ => bail!("{} must not be empty", name),
    }
}

fn optional_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn optional_index(params: &Value, name: &str) -> Result<Option<usize>> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match v.as_u64() {
            Some(n) => Ok(Some(n as usize)),
            None => bail!("invalid {}: expected a non-negative integer", name),
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in commands
// ═══════════════════════════════════════════════════════════════════════

/// `/quote`: a random quote.
pub struct QuoteCommand;

impl Command for QuoteCommand {
    fn name(&self) -> &str {
        "quote"
    }

    fn description(&self) -> &str {
        "Get a random inspirational quote"
    }

    fn execute(&self, _params: &Value, ctx: &CommandContext) -> Result<Reply> {
        let corpus = ctx.corpus();
        Ok(match query::random_quote(corpus) {
            Some(q) => Reply::Quote(QuoteCard::new("💬 Inspirational Quote", q, corpus)),
            None => unavailable(NO_QUOTES),
        })
    }
}

/// `/dailyquote`: the quote of the day, varied per guild.
pub struct DailyQuoteCommand;

impl Command for DailyQuoteCommand {
    fn name(&self) -> &str {
        "dailyquote"
    }

    fn description(&self) -> &str {
        "Get the quote of the day"
    }

    fn execute(&self, params: &Value, ctx: &CommandContext) -> Result<Reply> {
        let corpus = ctx.corpus();
        let scope = match params.get("guild_id") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            // Snowflake ids may arrive as JSON numbers.
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(_) => bail!("invalid guild_id: expected a string or integer"),
        };
        Ok(match query::daily_quote(corpus, ctx.today(), scope.as_deref()) {
            Some(q) => Reply::Quote(QuoteCard::new("🌅 Daily Quote", q, corpus)),
            None => unavailable("No daily quote available."),
        })
    }
}

/// `/quotebyauthor`: a random quote by the first author matching the input.
pub struct QuoteByAuthorCommand;

impl Command for QuoteByAuthorCommand {
    fn name(&self) -> &str {
        "quotebyauthor"
    }

    fn description(&self) -> &str {
        "Get a random quote by a specific author"
    }

    fn options(&self) -> Vec<CommandOption> {
        vec![CommandOption::string("author", "Author name")
            .required()
            .with_autocomplete()]
    }

    fn execute(&self, params: &Value, ctx: &CommandContext) -> Result<Reply> {
        let author = required_str(params, "author")?;
        let corpus = ctx.corpus();
        if corpus.is_empty() {
            return Ok(unavailable(NO_QUOTES));
        }

        let Some(found) = query::find_author(corpus, author) else {
            return Ok(Reply::NotFound {
                message: format!("No quotes found for author: \"{}\"", author),
                suggestions: query::suggest_authors(corpus, author)
                    .into_iter()
                    .map(String::from)
                    .collect(),
            });
        };

        let Some(q) = query::choose(&found.quotes, &mut rand::thread_rng()) else {
            return Ok(unavailable(NO_QUOTES));
        };
        Ok(Reply::Quote(
            QuoteCard::new(format!("📖 Quote by {}", found.author), q, corpus)
                .matched(found.quotes.len()),
        ))
    }

    fn autocomplete(&self, option: &str, value: &str, ctx: &CommandContext) -> Vec<Choice> {
        if option != "author" {
            return Vec::new();
        }
        complete_author(ctx.corpus(), value)
    }
}

/// `/searchquote`: a random quote containing every keyword.
pub struct SearchQuoteCommand;

impl Command for SearchQuoteCommand {
    fn name(&self) -> &str {
        "searchquote"
    }

    fn description(&self) -> &str {
        "Search for quotes containing specific words"
    }

    fn options(&self) -> Vec<CommandOption> {
        vec![CommandOption::string("keyword", "Keywords to search for (all must match)").required()]
    }

    fn execute(&self, params: &Value, ctx: &CommandContext) -> Result<Reply> {
        let keyword = required_str(params, "keyword")?;
        let corpus = ctx.corpus();
        if corpus.is_empty() {
            return Ok(unavailable(NO_QUOTES));
        }

        let results = query::search(corpus, keyword);
        Ok(match query::choose(&results, &mut rand::thread_rng()) {
            Some(q) => Reply::Quote(
                QuoteCard::new(format!("🔍 Quote containing \"{}\"", keyword), q, corpus)
                    .matched(results.len()),
            ),
            None => Reply::NotFound {
                message: format!("No quotes found containing: \"{}\"", keyword),
                suggestions: Vec::new(),
            },
        })
    }
}

/// `/quotestats`: collection statistics.
pub struct QuoteStatsCommand;

impl Command for QuoteStatsCommand {
    fn name(&self) -> &str {
        "quotestats"
    }

    fn description(&self) -> &str {
        "Get statistics about the quote collection"
    }

    fn execute(&self, _params: &Value, ctx: &CommandContext) -> Result<Reply> {
        if ctx.corpus().is_empty() {
            return Ok(unavailable(NO_QUOTES));
        }
        Ok(Reply::Stats {
            title: "📊 Quote Collection Statistics".to_string(),
            stats: CorpusStats::compute(ctx.corpus()),
        })
    }
}

/// `/authorlist`: one page of the sorted author list.
///
/// A slash invocation passes the 1-based `page` option. Navigation buttons
/// pass the zero-based `current` page they were rendered on plus a `nav`
/// action; the reply's `controls` carry the targets for the next round.
pub struct AuthorListCommand;

impl Command for AuthorListCommand {
    fn name(&self) -> &str {
        "authorlist"
    }

    fn description(&self) -> &str {
        "Get a list of all authors in the collection"
    }

    fn options(&self) -> Vec<CommandOption> {
        vec![CommandOption::integer("page", "Page number to show (starting at 1)")]
    }

    fn execute(&self, params: &Value, ctx: &CommandContext) -> Result<Reply> {
        let corpus = ctx.corpus();
        let page = match optional_str(params, "nav") {
            Some(nav) => {
                let nav: PageNav = nav.parse()?;
                let current = optional_index(params, "current")?.unwrap_or(0);
                navigate(corpus, current, nav)
            }
            None => {
                let page = optional_index(params, "page")?.unwrap_or(1);
                author_page(corpus, page.saturating_sub(1))
            }
        };
        Ok(Reply::Authors {
            title: "👥 Authors in Collection".to_string(),
            page,
        })
    }
}

/// `/randomauthor`: a random quote from a random author.
pub struct RandomAuthorCommand;

impl Command for RandomAuthorCommand {
    fn name(&self) -> &str {
        "randomauthor"
    }

    fn description(&self) -> &str {
        "Get a quote from a random author"
    }

    fn execute(&self, _params: &Value, ctx: &CommandContext) -> Result<Reply> {
        let corpus = ctx.corpus();
        let mut rng = rand::thread_rng();
        let picked = query::random_author_with_rng(corpus, &mut rng)
            .and_then(|m| query::choose(&m.quotes, &mut rng).map(|q| (m.author, m.quotes.len(), q)));
        Ok(match picked {
            Some((author, count, q)) => Reply::Quote(
                QuoteCard::new(format!("🎲 Random quote by {}", author), q, corpus).matched(count),
            ),
            None => unavailable(NO_QUOTES),
        })
    }
}

/// Which configured theme a [`ThemeCommand`] draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Motivational,
    Wisdom,
}

/// `/motivational` and `/wisdom`: a random quote from a theme.
pub struct ThemeCommand {
    kind: ThemeKind,
}

impl ThemeCommand {
    pub fn new(kind: ThemeKind) -> Self {
        Self { kind }
    }

    fn theme<'a>(&self, ctx: &'a CommandContext) -> &'a Theme {
        match self.kind {
            ThemeKind::Motivational => &ctx.themes.motivational,
            ThemeKind::Wisdom => &ctx.themes.wisdom,
        }
    }
}

impl Command for ThemeCommand {
    fn name(&self) -> &str {
        match self.kind {
            ThemeKind::Motivational => "motivational",
            ThemeKind::Wisdom => "wisdom",
        }
    }

    fn description(&self) -> &str {
        match self.kind {
            ThemeKind::Motivational => "Get a motivational quote",
            ThemeKind::Wisdom => "Get a wisdom quote",
        }
    }

    fn execute(&self, _params: &Value, ctx: &CommandContext) -> Result<Reply> {
        let corpus = ctx.corpus();
        let pick = query::themed_quote(corpus, self.theme(ctx));
        let title = match self.kind {
            ThemeKind::Motivational => "💪 Motivational Quote",
            ThemeKind::Wisdom => "🧠 Wisdom Quote",
        };
        Ok(match pick.quote {
            Some(q) => Reply::Quote(
                QuoteCard::new(title, q, corpus)
                    .matched(pick.matched)
                    .fallback(pick.fallback),
            ),
            None => unavailable(NO_QUOTES),
        })
    }
}

/// `/quotelength`: a random quote from a length bucket.
pub struct QuoteLengthCommand;

impl Command for QuoteLengthCommand {
    fn name(&self) -> &str {
        "quotelength"
    }

    fn description(&self) -> &str {
        "Get quotes by length preference"
    }

    fn options(&self) -> Vec<CommandOption> {
        vec![CommandOption::string("length", "Quote length preference")
            .required()
            .with_choices(LengthBucket::ALL.iter().map(|b| (b.label(), b.as_str())))]
    }

    fn execute(&self, params: &Value, ctx: &CommandContext) -> Result<Reply> {
        let bucket: LengthBucket = required_str(params, "length")?.parse()?;
        let corpus = ctx.corpus();
        let pick = query::quote_by_length(corpus, bucket);

        let title = match bucket {
            LengthBucket::Short => "📏 Short Quote",
            LengthBucket::Medium => "📏 Medium Quote",
            LengthBucket::Long => "📏 Long Quote",
        };
        let card = match pick.quote {
            Some(q) => QuoteCard::new(title, q, corpus).matched(pick.matched),
            None => match query::random_quote(corpus) {
                Some(q) => QuoteCard::new(title, q, corpus).matched(0).fallback(true),
                None => return Ok(unavailable(NO_QUOTES)),
            },
        };
        Ok(Reply::Quote(card))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════

/// Ordered collection of commands, looked up by name.
///
/// ```rust
/// use quotebot::commands::CommandRegistry;
///
/// let commands = CommandRegistry::with_builtins();
/// assert!(commands.find("quote").is_some());
/// ```
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Registry with every built-in slash command.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(QuoteCommand));
        registry.register(Box::new(DailyQuoteCommand));
        registry.register(Box::new(QuoteByAuthorCommand));
        registry.register(Box::new(SearchQuoteCommand));
        registry.register(Box::new(QuoteStatsCommand));
        registry.register(Box::new(AuthorListCommand));
        registry.register(Box::new(RandomAuthorCommand));
        registry.register(Box::new(ThemeCommand::new(ThemeKind::Motivational)));
        registry.register(Box::new(ThemeCommand::new(ThemeKind::Wisdom)));
        registry.register(Box::new(QuoteLengthCommand));
        registry
    }

    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[Box<dyn Command>] {
        &self.commands
    }

    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Registration payloads for every command, in registration order.
    pub fn infos(&self) -> Vec<CommandInfo> {
        self.commands.iter().map(|c| c.info()).collect()
    }

    /// Look up and run a command by name.
    pub fn dispatch(&self, name: &str, params: &Value, ctx: &CommandContext) -> Result<Reply> {
        let Some(command) = self.find(name) else {
            bail!("no command registered with name: {}", name);
        };
        command.execute(params, ctx)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

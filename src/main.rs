//! # Quotebot CLI (`quotebot`)
//!
//! Runs every slash command from the terminal and starts the HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! quotebot --config ./config/quotebot.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Slash command |
//! |---------|---------------|
//! | `quotebot quote` | `/quote` |
//! | `quotebot daily [--scope ID]` | `/dailyquote` |
//! | `quotebot author <NAME>` | `/quotebyauthor` |
//! | `quotebot search <KEYWORDS>...` | `/searchquote` |
//! | `quotebot stats` | `/quotestats` |
//! | `quotebot authors [--page N] [--nav ACTION]` | `/authorlist` |
//! | `quotebot random-author` | `/randomauthor` |
//! | `quotebot motivational` | `/motivational` |
//! | `quotebot wisdom` | `/wisdom` |
//! | `quotebot length <short\|medium\|long>` | `/quotelength` |
//! | `quotebot complete <PARTIAL>` | author autocomplete |
//! | `quotebot commands` | list slash commands |
//! | `quotebot check` | validate config and corpus |
//! | `quotebot serve` | start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! quotebot author einstein
//! quotebot search great minds
//! quotebot authors --page 2 --nav next
//! quotebot --json daily --scope 123456789012345678
//! ```

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quotebot::commands::{CommandContext, CommandRegistry};
use quotebot::config::{load_config, Config};
use quotebot::corpus::{load_corpus, try_load_corpus};
use quotebot::render::render;
use quotebot::server;

const DEFAULT_CONFIG: &str = "./config/quotebot.toml";

/// Quotebot: an inspirational-quote bot backed by a plain-text corpus.
#[derive(Parser)]
#[command(
    name = "quotebot",
    about = "Quotebot: random, daily, themed and searchable quotes from a plain-text corpus",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/quotebot.toml`; when that file does not exist,
    /// built-in defaults are used with the corpus at `./quotes.txt`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print replies as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// A random quote.
    Quote,

    /// The quote of the day.
    Daily {
        /// Scope id (e.g. a guild id) that varies the pick.
        #[arg(long)]
        scope: Option<String>,

        /// Use this date (YYYY-MM-DD) instead of today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// A random quote by the first author whose name contains NAME.
    Author {
        /// Author name or fragment, case-insensitive.
        name: String,
    },

    /// A random quote containing every keyword.
    Search {
        /// Keywords; all must appear in the text or author.
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Collection statistics.
    Stats,

    /// One page of the author list.
    Authors {
        /// Page number, starting at 1.
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Navigate from `--page`: first, previous, next, or last.
        #[arg(long)]
        nav: Option<String>,
    },

    /// A random quote from a random author.
    RandomAuthor,

    /// A motivational quote.
    Motivational,

    /// A wisdom quote.
    Wisdom,

    /// A random quote from a length bucket.
    Length {
        #[arg(value_parser = ["short", "medium", "long"])]
        length: String,
    },

    /// Author suggestions for a partially typed name.
    Complete {
        #[arg(default_value = "")]
        partial: String,
    },

    /// List the slash commands and their options.
    Commands,

    /// Validate the configuration and parse the corpus.
    Check,

    /// Start the HTTP server.
    ///
    /// Binds to `[server].bind` and serves the command API plus the
    /// liveness endpoints.
    Serve,

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "quotebot", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = resolve_config(cli.config.as_deref())?;
    init_tracing(&cfg);

    match cli.command {
        Commands::Serve => server::run_server(&cfg).await?,
        Commands::Check => run_check(&cfg)?,
        Commands::Commands => list_commands(cli.json)?,
        Commands::Complete { partial } => {
            let ctx = command_context(&cfg, None);
            let registry = CommandRegistry::with_builtins();
            let choices = match registry.find("quotebyauthor") {
                Some(c) => c.autocomplete("author", &partial, &ctx),
                None => Vec::new(),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&choices)?);
            } else {
                for choice in choices {
                    println!("{}", choice.name);
                }
            }
        }
        Commands::Completions { .. } => {}
        command => {
            let (name, params, date) = slash_invocation(command);
            let ctx = command_context(&cfg, date);
            let reply = CommandRegistry::with_builtins().dispatch(name, &params, &ctx)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
            } else {
                println!("{}", render(&reply));
            }
        }
    }

    Ok(())
}

/// An explicit `--config` must load. Without one, the default path is used
/// if it exists and built-in defaults otherwise.
fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG).exists() => load_config(Path::new(DEFAULT_CONFIG)),
        None => Ok(Config::minimal()),
    }
}

fn init_tracing(cfg: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

fn command_context(cfg: &Config, date: Option<NaiveDate>) -> CommandContext {
    let corpus = Arc::new(load_corpus(&cfg.corpus.path));
    let ctx = CommandContext::new(corpus, cfg.themes.clone());
    match date {
        Some(date) => ctx.with_date(date),
        None => ctx,
    }
}

/// Map a query subcommand onto its slash command name and option values.
fn slash_invocation(command: Commands) -> (&'static str, Value, Option<NaiveDate>) {
    match command {
        Commands::Quote => ("quote", json!({}), None),
        Commands::Daily { scope, date } => ("dailyquote", json!({ "guild_id": scope }), date),
        Commands::Author { name } => ("quotebyauthor", json!({ "author": name }), None),
        Commands::Search { keywords } => (
            "searchquote",
            json!({ "keyword": keywords.join(" ") }),
            None,
        ),
        Commands::Stats => ("quotestats", json!({}), None),
        Commands::Authors { page, nav } => {
            let params = match nav {
                Some(nav) => json!({ "current": page.saturating_sub(1), "nav": nav }),
                None => json!({ "page": page }),
            };
            ("authorlist", params, None)
        }
        Commands::RandomAuthor => ("randomauthor", json!({}), None),
        Commands::Motivational => ("motivational", json!({}), None),
        Commands::Wisdom => ("wisdom", json!({}), None),
        Commands::Length { length } => ("quotelength", json!({ "length": length }), None),
        Commands::Complete { .. }
        | Commands::Commands
        | Commands::Check
        | Commands::Serve
        | Commands::Completions { .. } => unreachable!("not a slash command"),
    }
}

fn run_check(cfg: &Config) -> Result<()> {
    let corpus = try_load_corpus(&cfg.corpus.path)?;
    if corpus.is_empty() {
        bail!("no quotes parsed from {}", cfg.corpus.path.display());
    }
    println!("Config OK");
    println!("  Corpus:        {}", cfg.corpus.path.display());
    println!("  Quotes:        {}", corpus.len());
    println!("  Authors:       {}", corpus.author_count());
    println!("  Skipped lines: {}", corpus.skipped_lines());
    println!("  Bind:          {}", cfg.server.bind);
    match &cfg.keepalive {
        Some(k) => println!("  Keep-alive:    {} every {}s", k.url, k.interval_secs),
        None => println!("  Keep-alive:    off"),
    }
    Ok(())
}

fn list_commands(json: bool) -> Result<()> {
    let infos = CommandRegistry::with_builtins().infos();
    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }
    for info in infos {
        println!("/{:<14} {}", info.name, info.description);
        for opt in info.options {
            let required = if opt.required { "required" } else { "optional" };
            println!("    {:<12} {} ({})", opt.name, opt.description, required);
        }
    }
    Ok(())
}

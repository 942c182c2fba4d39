//! HTTP server.
//!
//! Serves the slash commands over a JSON API so a chat-platform gateway (or
//! anything else) can drive the bot, plus the liveness endpoints an uptime
//! monitor polls.
//!
//! Every command is registered in the [`CommandRegistry`] and dispatched
//! through the same `POST /commands/{name}` handler.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Liveness message with uptime |
//! | `GET`  | `/health` | Health check (version, corpus size) |
//! | `GET`  | `/commands/list` | Registration payload for every command |
//! | `POST` | `/commands/{name}` | Run a command |
//! | `POST` | `/autocomplete/{name}` | Suggestions for a partially typed option |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "quotebyauthor: author must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use quotebot_core::autocomplete::Choice;

use crate::commands::{CommandContext, CommandInfo, CommandRegistry};
use crate::config::Config;
use crate::corpus::load_corpus;
use crate::keepalive;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    commands: Arc<CommandRegistry>,
    ctx: CommandContext,
    started: Instant,
}

/// Load the corpus, start the keep-alive pinger if configured, and serve
/// until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let corpus = Arc::new(load_corpus(&config.corpus.path));
    let ctx = CommandContext::new(corpus, config.themes.clone());

    let commands = CommandRegistry::with_builtins();
    for c in commands.commands() {
        debug!(command = c.name(), "Registered command");
    }

    if let Some(keepalive) = &config.keepalive {
        keepalive::spawn(keepalive.clone());
    }

    let state = AppState {
        commands: Arc::new(commands),
        ctx,
        started: Instant::now(),
    };

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!(
        bind = %config.server.bind,
        quotes = state.ctx.corpus().len(),
        "Quotebot listening"
    );
    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/commands/list", get(handle_list_commands))
        .route("/commands/{name}", post(handle_command))
        .route("/autocomplete/{name}", post(handle_autocomplete))
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found",
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal",
        message: message.into(),
    }
}

/// Map a command error to a status by its message. Argument problems are
/// the caller's fault; anything else is ours.
fn classify_command_error(command: &str, err: anyhow::Error) -> AppError {
    let msg = format!("{}: {:#}", command, err);
    if msg.contains("must not be empty") || msg.contains("invalid") {
        bad_request(msg)
    } else {
        warn!(command, error = %err, "Command failed");
        internal(msg)
    }
}

// ============ GET / ============

#[derive(Serialize)]
struct RootResponse {
    status: &'static str,
    uptime_secs: u64,
    timestamp: String,
}

async fn handle_root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        status: "Bot is running!",
        uptime_secs: state.started.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    quotes: usize,
    authors: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let corpus = state.ctx.corpus();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        quotes: corpus.len(),
        authors: corpus.author_count(),
    })
}

// ============ GET /commands/list ============

#[derive(Serialize)]
struct CommandListResponse {
    commands: Vec<CommandInfo>,
}

async fn handle_list_commands(State(state): State<AppState>) -> Json<CommandListResponse> {
    Json(CommandListResponse {
        commands: state.commands.infos(),
    })
}

// ============ POST /commands/{name} ============

/// Run a command. The body is a JSON object of option values; an empty
/// body is treated as `{}`.
async fn handle_command(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let command = state
        .commands
        .find(&name)
        .ok_or_else(|| not_found(format!("no command registered with name: {}", name)))?;

    let params: serde_json::Value = if body.is_empty() {
        serde_json::json!({})
    } else {
        serde_json::from_slice(&body).map_err(|e| bad_request(format!("invalid JSON body: {}", e)))?
    };
    if !params.is_object() {
        return Err(bad_request("request body must be a JSON object"));
    }

    debug!(command = %name, "Running command");
    let reply = command
        .execute(&params, &state.ctx)
        .map_err(|e| classify_command_error(&name, e))?;

    Ok(Json(serde_json::json!({ "result": reply })))
}

// ============ POST /autocomplete/{name} ============

#[derive(Deserialize)]
struct AutocompleteRequest {
    option: String,
    #[serde(default)]
    value: String,
}

#[derive(Serialize)]
struct AutocompleteResponse {
    choices: Vec<Choice>,
}

async fn handle_autocomplete(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<AutocompleteResponse>, AppError> {
    let command = state
        .commands
        .find(&name)
        .ok_or_else(|| not_found(format!("no command registered with name: {}", name)))?;

    if body.is_empty() {
        return Err(bad_request("invalid JSON body: expected {\"option\", \"value\"}"));
    }
    let req: AutocompleteRequest = serde_json::from_slice(&body)
        .map_err(|e| bad_request(format!("invalid JSON body: {}", e)))?;

    Ok(Json(AutocompleteResponse {
        choices: command.autocomplete(&req.option, &req.value, &state.ctx),
    }))
}

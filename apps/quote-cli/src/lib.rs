//! # presswork-quote
//!
//! Command line shell around the pricing core: loads configuration and the
//! catalog, runs one command, prints JSON.
//!
//! ## Module Organization
//! ```text
//! presswork_quote/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── QuoteConfig (defaults, quote.toml, env)
//! ├── state/
//! │   ├── catalog.rs  ◄─── Loaded catalog + limits
//! │   └── order.rs    ◄─── Draft order (Arc<Mutex>)
//! ├── commands/
//! │   ├── product.rs  ◄─── search_products, get_product
//! │   ├── quote.rs    ◄─── quote_product
//! │   └── order.rs    ◄─── add/remove/get/clear draft lines
//! └── error.rs        ◄─── ApiError for command results
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CLI Startup                                       │
//! │                                                                         │
//! │  1. Parse arguments ──────────────────────────────────────────────────► │
//! │     • clap: --config PATH, subcommand (in main)                         │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → quote.toml → PRESSWORK_* env → validate                │
//! │                                                                         │
//! │  3. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • RUST_LOG wins over logging.filter                                 │
//! │                                                                         │
//! │  4. Load State ───────────────────────────────────────────────────────► │
//! │     • CatalogState: catalog file(s), validated                          │
//! │     • OrderDraftState: draft.json (order commands only)                 │
//! │                                                                         │
//! │  5. Run Command ──────────────────────────────────────────────────────► │
//! │     • JSON response (or ApiError) on stdout                             │
//! │     • draft saved after add/remove/clear                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use serde::Serialize;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, Invocation, OrderCommand};
use crate::commands::{order, product, quote};
use crate::config::QuoteConfig;
use crate::error::ApiError;
use crate::state::{CatalogState, OrderDraftState};

/// Runs one parsed invocation and returns the response document.
pub async fn run(invocation: Invocation) -> Result<Value, ApiError> {
    let config = QuoteConfig::load(invocation.config)?;

    init_tracing(&config.logging.filter);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting presswork-quote");

    execute(&config, invocation.command).await
}

/// Executes a parsed command against the configured catalog and draft.
pub async fn execute(config: &QuoteConfig, command: Command) -> Result<Value, ApiError> {
    match command {
        Command::Search { query, limit } => {
            let catalog = CatalogState::load(config).await?;
            to_json(&product::search_products(&catalog, &query.join(" "), limit)?)
        }

        Command::Product { id } => {
            let catalog = CatalogState::load(config).await?;
            to_json(&product::get_product(&catalog, &id)?)
        }

        Command::Quote { source } => {
            let request = serde_json::from_str(&source.read().await?)?;
            let catalog = CatalogState::load(config).await?;
            to_json(&quote::quote_product(&catalog, request)?)
        }

        Command::Order { command } => {
            execute_order(config, command.unwrap_or(OrderCommand::Show)).await
        }
    }
}

async fn execute_order(config: &QuoteConfig, command: OrderCommand) -> Result<Value, ApiError> {
    let draft_path = config.draft_path();
    let draft = OrderDraftState::load(&draft_path).await?;

    let response = match command {
        OrderCommand::Add { source } => {
            let request = serde_json::from_str(&source.read().await?)?;
            let catalog = CatalogState::load(config).await?;
            order::add_to_order(&catalog, &draft, request)?
        }
        OrderCommand::Remove { line_id } => order::remove_from_order(&draft, &line_id)?,
        OrderCommand::Clear => order::clear_order(&draft),
        OrderCommand::Show => return to_json(&order::get_order(&draft)),
    };

    draft.save(&draft_path).await?;
    to_json(&response)
}

/// Renders a command outcome for stdout.
pub fn render(outcome: &Result<Value, ApiError>) -> String {
    let rendered = match outcome {
        Ok(value) => serde_json::to_string_pretty(value),
        Err(err) => serde_json::to_string_pretty(err),
    };
    rendered.unwrap_or_else(|e| format!("{{\"code\":\"INTERNAL\",\"message\":\"{}\"}}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=presswork=trace` - Show trace for presswork crates only
/// - Default: `logging.filter` from the config (`info,presswork=debug`)
///
/// Logs go to stderr so stdout carries only the JSON response.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

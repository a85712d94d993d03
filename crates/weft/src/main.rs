// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weft - shirt-order feed server and importer.
//!
//! This is the binary entry point for the weft pipeline: the feed API
//! server, the reconciling importer, delivery conversion, and the board
//! commands that inspect and move stored orders.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use weft_config::{ConfigError, WeftConfig};
use weft_core::OrderState;

mod board;
mod convert;
mod serve;
mod status;
mod sync;

/// Weft - shirt-order feed server and importer.
#[derive(Parser, Debug)]
#[command(name = "weft", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default lookup.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the order feed API server.
    Serve,
    /// Fetch a batch from the feed and reconcile it into the store.
    Sync {
        /// How many records to request; the feed picks when omitted.
        #[arg(long)]
        amount: Option<u32>,
        /// Keep syncing on the configured interval until interrupted.
        #[arg(long)]
        watch: bool,
    },
    /// Derive deliveries for reconciled orders.
    Convert {
        /// Convert a single order instead of the whole backlog.
        #[arg(long, value_name = "EXTERNAL_ID")]
        order: Option<i64>,
    },
    /// Print stored orders in board order.
    List {
        /// Only show orders in this workflow state.
        #[arg(long, value_parser = parse_state_arg)]
        state: Option<OrderState>,
    },
    /// Move an order to another workflow state.
    Mark {
        /// External id of the order to move.
        #[arg(long, value_name = "EXTERNAL_ID")]
        order: i64,
        /// Target workflow state.
        #[arg(long, value_parser = parse_state_arg)]
        state: OrderState,
    },
    /// Show store totals and feed liveness.
    Status {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            weft_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Serve => serve::run_serve(&config).await,
        Commands::Sync { amount, watch } => sync::run_sync(&config, amount, watch).await,
        Commands::Convert { order } => convert::run_convert(&config, order).await,
        Commands::List { state } => board::run_list(&config, state).await,
        Commands::Mark { order, state } => board::run_mark(&config, order, state).await,
        Commands::Status { json, plain } => status::run_status(&config, json, plain).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("weft: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration from an explicit path or the default lookup chain.
fn load_config(path: Option<&std::path::Path>) -> Result<WeftConfig, Vec<ConfigError>> {
    match path {
        Some(path) => weft_config::load_and_validate_path(path),
        None => weft_config::load_and_validate(),
    }
}

/// Parses a workflow state argument in its stored kebab-case form.
fn parse_state_arg(raw: &str) -> Result<OrderState, String> {
    OrderState::from_str(raw).map_err(|_| {
        format!("unknown state {raw:?} (expected to-do, in-process, done, or delivered)")
    })
}

/// Initializes the tracing subscriber with the given log level.
///
/// Called by the commands that log (serve, sync, convert); the board and
/// status commands own stdout and stay silent.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "weft={level},weft_feed={level},weft_client={level},weft_store={level},weft_sync={level},warn",
            level = log_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

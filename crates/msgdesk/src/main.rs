// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! msgdesk - operator console for SMS and email message templates.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod list;
mod render;
mod shell;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use msgdesk_core::{Channel, MessageTab};

/// msgdesk - operator console for SMS and email message templates.
#[derive(Parser, Debug)]
#[command(name = "msgdesk", version, about, long_about = None)]
struct Cli {
    /// Load this configuration file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive console (default).
    Shell,
    /// Print the messages of one tab.
    List {
        /// sms_broadcast, sms_funnel, email_broadcast or email_funnel.
        #[arg(long)]
        tab: Option<MessageTab>,
        /// Case-insensitive substring of the content name.
        #[arg(long, default_value = "")]
        search: String,
        /// Exact category name.
        #[arg(long, default_value = "")]
        category: String,
        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the categories of one channel.
    Categories {
        /// sms or email.
        #[arg(long, default_value = "sms")]
        channel: Channel,
        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Check configuration and backend connectivity.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => msgdesk_config::load_and_validate_path(path),
        None => msgdesk_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            msgdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.console.log_level);

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run_shell(&config).await,
        Commands::List {
            tab,
            search,
            category,
            json,
            plain,
        } => {
            let tab = tab.unwrap_or(config.console.default_tab);
            list::run_list(&config, tab, &search, &category, json, plain).await
        }
        Commands::Categories { channel, json } => {
            list::run_categories(&config, channel, json).await
        }
        Commands::Check { plain } => match check::run_check(&config, plain).await {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(2),
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so `--json` output stays parseable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("msgdesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

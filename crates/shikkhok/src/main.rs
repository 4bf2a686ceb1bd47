//! Shikkhok - Educational tutor chatbot
//!
//! Main entry point for the Shikkhok CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{ask, chat, kb};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Shikkhok - Educational tutor chatbot
#[derive(Parser)]
#[command(name = "shikkhok")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a one-shot question
    Ask(ask::AskArgs),

    /// Enter interactive chat mode (REPL)
    Chat(chat::ChatArgs),

    /// Show knowledge base status
    Kb(kb::KbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — console, env-filterable
    let filter = if cli.verbose {
        "shikkhok=debug,shikkhok_resolver=debug,shikkhok_kb=debug,shikkhok_llm=debug,info"
    } else {
        "shikkhok=info,shikkhok_resolver=info,shikkhok_kb=info,shikkhok_llm=info,warn"
    };

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter))),
        )
        .init();

    let loaded = shikkhok_config::load_config(None)?;
    let ctx = commands::Context {
        config: loaded.config,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Ask(args) => ask::run(args, &ctx).await,
        Commands::Chat(args) => chat::run(args, &ctx).await,
        Commands::Kb(args) => kb::run(args, &ctx),
    }
}

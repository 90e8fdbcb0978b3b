//! # OpsForge Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the OpsForge CLI
//! application. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! The application follows a modular command structure:
//! - Each top-level command (`scaffold`, `review`, `docs`) is defined as a
//!   variant in the `Commands` enum
//! - Commands are mapped to handler functions in their respective modules
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! Basic OpsForge usage:
//!
//! ```bash
//! # Get help
//! opsforge --help
//!
//! # Scaffold a project with increased verbosity
//! opsforge -vv scaffold demo --type terraform
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

// Declare the top-level modules of the CLI crate.
mod commands; // Handles specific command logic (scaffold, review, docs)
mod common; // Contains shared utilities (classify, exec, fs)
mod core; // Core infrastructure (errors, config, templating)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "opsforge",
    about = "OpsForge: AI-assisted DevOps project scaffolding, review, and docs",
    long_about = "Scaffold AI-assistant-ready projects, generate bulk review reports,\n\
                  and produce documentation skeletons for DevOps codebases.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "s")]
    Scaffold(commands::scaffold::ScaffoldArgs),
    #[command(alias = "r")]
    Review(commands::review::ReviewArgs),
    #[command(alias = "d")]
    Docs(commands::docs::DocsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Scaffold(args) => commands::scaffold::handle_scaffold(args).await,
        Commands::Review(args) => commands::review::handle_review(args).await,
        Commands::Docs(args) => commands::docs::handle_docs(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

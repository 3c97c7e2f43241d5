// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mentora - AI-assisted learning platform backend.
//!
//! This is the binary entry point for the Mentora server.

use clap::{Parser, Subcommand};

mod serve;

/// Mentora - AI-assisted learning platform backend.
#[derive(Parser, Debug)]
#[command(name = "mentora", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Mentora API server.
    Serve,
    /// Print the effective configuration and exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match mentora_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            mentora_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("mentora serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            println!("agent.name = {}", config.agent.name);
            println!("agent.log_level = {}", config.agent.log_level);
            println!("agent.max_questions = {}", config.agent.max_questions);
            println!("gateway.bind_address = {}", config.gateway.bind_address);
            println!("gateway.port = {}", config.gateway.port);
            println!("storage.database_path = {}", config.storage.database_path);
            println!("openai.configured = {}", config.openai.api_key.is_some());
            println!(
                "email.notifications_enabled = {}",
                config.email.notifications_enabled
            );
            println!(
                "sandbox.execution_timeout_secs = {}",
                config.sandbox.execution_timeout_secs
            );
        }
        None => {
            println!("mentora: use --help for available commands");
        }
    }
}

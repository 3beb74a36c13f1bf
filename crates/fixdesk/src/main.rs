// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixdesk - facility-maintenance complaint desk over Telegram.
//!
//! This is the binary entry point.

mod serve;

use clap::{Parser, Subcommand};

/// Fixdesk - facility-maintenance complaint desk over Telegram.
#[derive(Parser, Debug)]
#[command(name = "fixdesk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the complaint desk (default).
    Serve,
    /// Load and validate the configuration, then exit.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match fixdesk_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            fixdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::CheckConfig) => {
            println!("configuration OK (bot.name={})", config.bot.name);
        }
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}

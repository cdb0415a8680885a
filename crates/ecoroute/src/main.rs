// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ecoroute - a carbon-aware LLM router.
//!
//! This is the binary entry point: the HTTP gateway (`serve`) and one-shot
//! commands over the same routing engine.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod providers;
mod serve;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ecoroute_cascade::EcoRouter;
use ecoroute_config::EcorouteConfig;
use ecoroute_core::EcorouteError;

/// ecoroute - route each prompt to the lowest-impact model that can answer it.
#[derive(Parser, Debug)]
#[command(name = "ecoroute", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Answer a prompt through the provider cascade.
    Query {
        /// The prompt text.
        prompt: String,
        /// Send the prompt to this provider only, bypassing the gates.
        #[arg(long, short)]
        model: Option<String>,
    },
    /// Recommend a tier for a prompt without calling any provider.
    Suggest {
        /// The prompt text.
        prompt: String,
    },
    /// Show the complexity score and keyword categories of a prompt.
    Classify {
        /// The prompt text.
        prompt: String,
    },
    /// List the provider table with health status.
    Providers,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => ecoroute_config::load_and_validate_path(path),
        None => ecoroute_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            ecoroute_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    serve::init_tracing(&config.server.log_level);

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: EcorouteConfig) -> Result<(), EcorouteError> {
    let output = match command {
        Commands::Serve => return serve::run_serve(config).await,
        Commands::Query { prompt, model } => {
            commands::query(&engine(&config)?, &prompt, model.as_deref()).await?
        }
        Commands::Suggest { prompt } => commands::suggest(&engine(&config)?, &prompt)?,
        Commands::Classify { prompt } => commands::classify(&engine(&config)?, &prompt)?,
        Commands::Providers => commands::providers(&engine(&config)?).await?,
    };
    println!("{output}");
    Ok(())
}

fn engine(config: &EcorouteConfig) -> Result<EcoRouter, EcorouteError> {
    let registry = providers::build_registry(config)?;
    Ok(EcoRouter::from_config(config, registry))
}

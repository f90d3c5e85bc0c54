// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ferry - inspect and probe transfer backends.
//!
//! This is the binary entry point for the `ferry` command.

mod plugins;
mod probe;
mod registry;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ferry_core::{FerryError, Role};

/// Ferry - inspect and probe transfer backends.
#[derive(Parser, Debug)]
#[command(name = "ferry", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect registered backends.
    Plugins {
        #[command(subcommand)]
        action: PluginsAction,
    },
    /// Bind a backend from its plugin, fill its settings, and test the target.
    Probe {
        /// Backend identifier (e.g., Local).
        backend: String,
        /// Settings field as key=value; repeatable.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Also check whether a missing target could be created.
        #[arg(long)]
        create: bool,
    },
}

#[derive(Subcommand, Debug)]
enum PluginsAction {
    /// List every registered backend.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Search backends by id, name, or description.
    Search { query: String },
    /// Resolve the sibling of a component.
    Resolve {
        /// Fully qualified component name.
        name: String,
        /// Role of the sibling to resolve (plugin, settings, manager).
        #[arg(long)]
        role: Role,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => ferry_config::load_and_validate_path(path),
        None => ferry_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            ferry_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &ferry_config::FerryConfig) -> Result<(), FerryError> {
    let registry = registry::build_registry(config)?;
    match command {
        Commands::Plugins { action } => match action {
            PluginsAction::List { json } => plugins::run_list(&registry, json),
            PluginsAction::Search { query } => plugins::run_search(&registry, &query),
            PluginsAction::Resolve { name, role } => plugins::run_resolve(&registry, &name, role),
        },
        Commands::Probe {
            backend,
            set,
            create,
        } => probe::run_probe(&registry, &backend, &set, create).await,
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ferry={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bindery - pluggable book metadata lookup.
//!
//! This is the binary entry point: it loads configuration, initializes the
//! metadata-provider category and runs one command against it.

mod providers;
mod search;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bindery_config::loader::CONFIG_FILE_NAME;
use bindery_config::{BinderyConfig, ConfigStore};
use bindery_core::BinderyError;
use bindery_metadata::{MetadataProviderCategory, MetadataSearch};
use clap::{Parser, Subcommand};
use tracing::warn;

/// Bindery - pluggable book metadata lookup.
#[derive(Parser, Debug)]
#[command(name = "bindery", version, about, long_about = None)]
struct Cli {
    /// Configuration file. Enabled-provider changes are written back to it.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect and toggle metadata providers.
    Providers {
        #[command(subcommand)]
        action: ProvidersCommand,
    },
    /// Search enabled providers for a book title.
    Search {
        /// Title to search for.
        title: String,
        /// Only query this provider.
        #[arg(long)]
        provider: Option<String>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ProvidersCommand {
    /// List every available provider and its state.
    List {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Enable a provider and save the enabled list.
    Enable { name: String },
    /// Disable a provider and save the enabled list.
    Disable { name: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => bindery_config::load_and_validate_path(path),
        None => bindery_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            bindery_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    if let Err(e) = run(cli, config).await {
        eprintln!("bindery: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: BinderyConfig) -> Result<(), BinderyError> {
    let persist_path = cli.config.clone().or_else(default_persist_path);
    let base_dir = cli
        .config
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf);
    let store = match &persist_path {
        Some(path) => ConfigStore::file_backed(config.clone(), path),
        None => {
            warn!("no writable configuration file, provider changes will not be saved");
            ConfigStore::in_memory(config.clone())
        }
    };

    let category: Arc<MetadataProviderCategory> = Arc::new(bindery_metadata::initialize(
        &config,
        Arc::new(store),
        base_dir.as_deref(),
    )?);

    match cli.command {
        Commands::Providers { action } => match action {
            ProvidersCommand::List { json } => providers::run_list(&category, json, cli.plain),
            ProvidersCommand::Enable { name } => providers::run_enable(&category, &name),
            ProvidersCommand::Disable { name } => providers::run_disable(&category, &name),
        },
        Commands::Search {
            title,
            provider,
            json,
        } => {
            let search = MetadataSearch::from_config(category, &config);
            search::run_search(&search, &title, provider.as_deref(), json, cli.plain).await
        }
    }
}

/// `./bindery.toml` when present, else the per-user config file.
fn default_persist_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    bindery_config::user_config_path()
}

/// Initializes the tracing subscriber with the given log level. Logs go to
/// stderr so `--json` output stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bindery={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "bindery",
            "search",
            "Dune",
            "--provider",
            "google",
            "--config",
            "/tmp/bindery.toml",
            "--plain",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/bindery.toml")));
        assert!(cli.plain);
        match cli.command {
            Commands::Search {
                title, provider, ..
            } => {
                assert_eq!(title, "Dune");
                assert_eq!(provider.as_deref(), Some("google"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = bindery_config::load_and_validate_str("").unwrap();
        assert_eq!(config.enabled_list(bindery_config::METADATA_PROVIDERS_KEY), Some("douban,google"));
    }
}

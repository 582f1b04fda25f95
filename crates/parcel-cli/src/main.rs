//! # parcel
//!
//! Publishes packages to a package store and fetches versioned packages from
//! it into the working directory.
//!
//! This is the entry point: it parses the command line, sets up logging,
//! loads store settings and dispatches to the command handlers.

use std::process::ExitCode;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use parcel_config::StoreSettings;
use parcel_core::error::ParcelError;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Versioned package publishing and fetching
#[derive(Parser)]
#[command(name = "parcel", version, about = "Versioned package publishing and fetching")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Package store directory (overrides ~/.parcel.json and PARCEL_STORE)
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<Utf8PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a package from a create config and upload it
    Create {
        /// Create config (.json, .yaml, .yml or .toml)
        config: Utf8PathBuf,
    },
    /// Fetch the packages named in an update config
    Update {
        /// Update config (.json, .yaml, .yml or .toml)
        config: Utf8PathBuf,
        /// Print the fetch plan without downloading anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List the packages in the store
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting parcel v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    rt.block_on(async move {
        let settings = StoreSettings::load(cli.store)
            .await
            .context("Failed to load store settings")?;
        let ctx = CommandContext::new(settings)?;

        commands::dispatch_command(cli.command, &ctx).await?;
        Ok::<(), anyhow::Error>(())
    })
}

fn report(error: &anyhow::Error) {
    let formatter = ErrorFormatter::new();

    match error.chain().find_map(|cause| cause.downcast_ref::<ParcelError>()) {
        Some(parcel_error) => {
            let top = error.to_string();
            if top != parcel_error.to_string() {
                eprintln!("{}", formatter.format_simple(&top));
            }
            eprintln!("{}", formatter.format_error(parcel_error));
        },
        None => eprintln!("{}", formatter.format_simple(&format!("{:#}", error))),
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            ["parcel", "parcel_core", "parcel_config", "parcel_resolver", "parcel_store"]
                .iter()
                .map(|target| format!("{}={}", target, level))
                .collect::<Vec<_>>()
                .join(","),
        )
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("parcel encountered an unexpected error: {}", panic_info);
        eprintln!("parcel crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}

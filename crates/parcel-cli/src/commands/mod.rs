//! Command implementations and dispatch logic.
//!
//! Each command is an async function over a `CommandContext`, generic in the
//! package store so tests can point it at a temporary directory.

use camino::{Utf8Path, Utf8PathBuf};
use parcel_config::StoreSettings;
use parcel_core::error::{ParcelError, ParcelResult};
use parcel_core::types::VersionConstraint;
use parcel_store::{DirectoryStore, PackageStore};
use tracing::info;

pub mod create;
pub mod list;
pub mod update;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext<S = DirectoryStore> {
    /// Working directory: packages are built from and extracted into it
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    pub store: S,
    /// Constraint for requirements that leave out `ver`
    pub default_constraint: VersionConstraint,
}

impl CommandContext {
    /// Create a context over the configured directory store
    pub fn new(settings: StoreSettings) -> ParcelResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| ParcelError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| {
            ParcelError::config("cwd", format!("Working directory is not UTF-8: {}", e))
        })?;

        info!("Using package store {}", settings.path);

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
            store: DirectoryStore::new(settings.path),
            default_constraint: settings.default_constraint,
        })
    }
}

impl<S: PackageStore> CommandContext<S> {
    /// Resolve a command line path against the working directory
    pub fn resolve_path(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command<S: PackageStore>(
    command: Commands,
    ctx: &CommandContext<S>,
) -> ParcelResult<()> {
    match command {
        Commands::Create { config } => {
            info!("Creating package from {}", config);
            create::execute(&config, ctx).await
        },
        Commands::Update { config, dry_run } => {
            info!("Updating packages from {} (dry_run: {})", config, dry_run);
            update::execute(&config, dry_run, ctx).await
        },
        Commands::List => list::execute(ctx).await,
    }
}

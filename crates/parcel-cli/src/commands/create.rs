//! `parcel create` command implementation.

use camino::Utf8Path;
use parcel_config::CreateConfig;
use parcel_core::error::{ParcelError, ParcelResult};
use parcel_store::{collect_targets, create_archive_file, PackageStore};
use tracing::{debug, info};

use super::update::{install, load_inventory};
use super::CommandContext;

/// Execute the `parcel create` command
pub async fn execute<S: PackageStore>(config: &Utf8Path, ctx: &CommandContext<S>) -> ParcelResult<()> {
    let config = CreateConfig::load(&ctx.resolve_path(config)).await?;
    let id = config.package_id()?;
    let dependencies = config.requirements(&ctx.default_constraint)?;

    ctx.output.step("📦", &format!("Creating {}", id));

    let inventory = load_inventory(ctx).await?;
    if inventory.entries().iter().any(|entry| entry.id == id) {
        return Err(ParcelError::PackageExists { name: id.to_string() });
    }

    if dependencies.is_empty() {
        debug!("{} has no dependencies", id);
    } else {
        install(&dependencies, &inventory, false, ctx).await?;
    }

    let targets = collect_targets(
        config.targets.iter().map(|target| (target.path(), target.exclude())),
        &ctx.cwd,
    )?;
    if targets.is_empty() {
        ctx.output.warn(&format!("No files matched the targets of {}", id));
    }
    info!("Packing {} files for {}", targets.len(), id);

    let name = id.to_string();
    let archive = create_archive_file(&name, &targets, &ctx.cwd)?;

    ctx.output.step("📤", &format!("Uploading {}", name));
    ctx.store.upload(&name, archive.path()).await?;

    ctx.output.success(&format!("Published {} ({} files)", name, targets.len()));
    Ok(())
}

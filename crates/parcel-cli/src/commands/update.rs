//! `parcel update` command implementation.
//!
//! Resolves the packages named in an update config against the store and
//! extracts every planned archive into the working directory, in plan order.

use camino::Utf8Path;
use parcel_config::UpdateConfig;
use parcel_core::error::{ParcelError, ParcelResult};
use parcel_core::types::Requirement;
use parcel_resolver::{FetchPlan, Inventory, Resolver};
use parcel_store::{extract_archive, PackageStore};
use tracing::{debug, info};

use super::CommandContext;

/// Execute the `parcel update` command
pub async fn execute<S: PackageStore>(
    config: &Utf8Path,
    dry_run: bool,
    ctx: &CommandContext<S>,
) -> ParcelResult<()> {
    let config = UpdateConfig::load(&ctx.resolve_path(config)).await?;
    let requirements = config.requirements(&ctx.default_constraint)?;

    let inventory = load_inventory(ctx).await?;
    install(&requirements, &inventory, dry_run, ctx).await?;
    Ok(())
}

/// Snapshot the store listing
pub async fn load_inventory<S: PackageStore>(ctx: &CommandContext<S>) -> ParcelResult<Inventory> {
    let names = ctx.store.list_entries().await?;
    let inventory = Inventory::from_names(names);
    debug!("Store holds {} packages", inventory.len());
    Ok(inventory)
}

/// Resolve `requirements` and, unless `dry_run`, fetch and extract the plan
pub async fn install<S: PackageStore>(
    requirements: &[Requirement],
    inventory: &Inventory,
    dry_run: bool,
    ctx: &CommandContext<S>,
) -> ParcelResult<FetchPlan> {
    let listed: Vec<String> = requirements.iter().map(|r| r.to_string()).collect();
    ctx.output.step("🔍", &format!("Resolving {}", listed.join(", ")));

    let plan = Resolver::new().resolve(requirements, inventory)?;

    if dry_run {
        ctx.output.step("📋", "Fetch plan");
        for entry in &plan {
            ctx.output.item(&format!("{} ({})", entry.package, entry.file_name));
        }
        return Ok(plan);
    }

    for entry in &plan {
        ctx.output.step("📥", &format!("Fetching {}", entry.package));
        let archive = ctx.store.fetch(&entry.file_name).await?;
        let file = archive.reopen().map_err(|e| {
            ParcelError::io(format!("Failed to open downloaded {}", entry.file_name), e)
        })?;

        info!("Extracting {}", archive.path().display());
        let report = extract_archive(file, ctx.cwd.as_std_path())?;
        for skipped in &report.skipped {
            ctx.output.warn(&format!("Skipped unsafe path {} in {}", skipped, entry.package));
        }
        ctx.output.success(&format!(
            "Installed {} ({} files)",
            entry.package,
            report.extracted.len()
        ));
    }

    Ok(plan)
}

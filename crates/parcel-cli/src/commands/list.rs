//! `parcel list` command implementation.

use parcel_core::error::ParcelResult;
use parcel_store::PackageStore;

use super::update::load_inventory;
use super::CommandContext;

/// Execute the `parcel list` command
pub async fn execute<S: PackageStore>(ctx: &CommandContext<S>) -> ParcelResult<()> {
    let inventory = load_inventory(ctx).await?;

    if inventory.is_empty() {
        ctx.output.info("No packages in store");
        return Ok(());
    }

    for id in inventory.sorted_ids() {
        ctx.output.item(&id.to_string());
    }
    Ok(())
}

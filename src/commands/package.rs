//! Package command implementation

use console::style;

use crate::asset::package::package_asset;
use crate::cli::PackageArgs;
use crate::error::Result;

/// Run package command
pub fn run(args: PackageArgs) -> Result<()> {
    let zip_path = package_asset(&args.asset_dir, args.dest.as_deref())?;
    println!(
        "{} Created asset zip: {}",
        style("✓").green().bold(),
        zip_path.display()
    );
    Ok(())
}

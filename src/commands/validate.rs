//! Validate command implementation

use console::style;

use crate::asset::validate::validate_asset_structure;
use crate::cli::ValidateArgs;
use crate::error::Result;

/// Run validate command
pub fn run(args: ValidateArgs) -> Result<()> {
    let asset_name = validate_asset_structure(&args.asset_dir)?;
    println!(
        "{} Asset '{}' has a valid structure",
        style("✓").green().bold(),
        asset_name
    );
    Ok(())
}

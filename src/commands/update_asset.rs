//! Update-asset command implementation

use console::style;

use crate::cli::UpdateAssetArgs;
use crate::commands::helpers::build_client;
use crate::error::Result;

/// Run update-asset command
pub fn run(
    url: Option<&str>,
    config_path: Option<&std::path::Path>,
    project: Option<&str>,
    args: UpdateAssetArgs,
) -> Result<()> {
    let client = build_client(url, config_path, project)?;
    client.update_asset_content(args.asset_id, &args.zip_file)?;
    println!(
        "{} Updated asset {} from {}",
        style("✓").green().bold(),
        args.asset_id,
        args.zip_file.display()
    );
    Ok(())
}

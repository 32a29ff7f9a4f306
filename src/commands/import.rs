//! Import command implementation

use console::style;

use crate::cli::ImportArgs;
use crate::commands::helpers::build_client;
use crate::error::Result;

/// Run import command
pub fn run(
    url: Option<&str>,
    config_path: Option<&std::path::Path>,
    project: Option<&str>,
    args: ImportArgs,
) -> Result<()> {
    let client = build_client(url, config_path, project)?;
    client.import_asset(&args.zip_file)?;
    println!(
        "{} Imported asset zip: {}",
        style("✓").green().bold(),
        args.zip_file.display()
    );
    Ok(())
}

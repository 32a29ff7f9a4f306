//! Config command implementation

use console::style;

use crate::cli::ConfigArgs;
use crate::config::stage_config;
use crate::error::Result;

/// Run config command
pub fn run(args: ConfigArgs) -> Result<()> {
    let staged = stage_config(&args.file, args.cert.as_deref())?;
    println!(
        "{} Staged configuration at: {}",
        style("✓").green().bold(),
        staged.display()
    );
    Ok(())
}

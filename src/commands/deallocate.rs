//! Deallocate command implementation

use std::time::Duration;

use console::style;
use inquire::Confirm;

use crate::cli::DeallocateArgs;
use crate::commands::helpers::build_client;
use crate::error::Result;
use crate::realm::deallocate::RealmReclaimer;

/// Wait between active-run checks during teardown
const RUN_WAIT_INTERVAL: Duration = Duration::from_secs(20);

/// Run deallocate command
pub fn run(
    url: Option<&str>,
    config_path: Option<&std::path::Path>,
    project: Option<&str>,
    args: DeallocateArgs,
) -> Result<()> {
    let client = build_client(url, config_path, project)?;

    let Some(vr_id) = client.get_virtualization_realm_id(args.cloud_id, &args.name)? else {
        println!(
            "No virtualization realm named '{}' in cloud {}, nothing to do",
            args.name, args.cloud_id
        );
        return Ok(());
    };

    if !args.yes {
        let prompt = format!(
            "Deallocate virtualization realm '{}' (id {})? This releases and deletes all of its deployment runs.",
            args.name, vr_id
        );
        let confirmed = Confirm::new(&prompt)
            .with_default(false)
            .prompt()
            .unwrap_or(false);
        if !confirmed {
            println!("Deallocation cancelled");
            return Ok(());
        }
    }

    let reclaimer = RealmReclaimer::new(&client, RUN_WAIT_INTERVAL);
    reclaimer.deallocate(args.cloud_id, vr_id)?;

    println!(
        "{} Deallocated virtualization realm '{}' (id {})",
        style("✓").green().bold(),
        args.name,
        vr_id
    );
    Ok(())
}

//! Allocate command implementation

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::AllocateArgs;
use crate::commands::helpers::build_client;
use crate::error::{BartError, Result};
use crate::realm::AllocationSettings;
use crate::realm::allocate::RealmAllocator;

/// Run allocate command
pub fn run(
    url: Option<&str>,
    config_path: Option<&std::path::Path>,
    project: Option<&str>,
    args: AllocateArgs,
) -> Result<()> {
    let client = build_client(url, config_path, project)?;

    let user = client.user().clone();
    let username = user.username.clone().ok_or(BartError::ConfigInvalid {
        message: "realm allocation requires a username in config.json".to_string(),
    })?;
    let project_id = client.get_project_id(&user.project_name)?;

    let settings = AllocationSettings {
        max_retries: args.retries,
        max_queries: args.queries,
        poll_interval: Duration::from_secs(args.interval),
    };

    println!(
        "Allocating virtualization realm '{}' in cloud {}",
        args.name, args.cloud_id
    );
    let spinner = allocation_spinner(&args.name);
    let allocator = RealmAllocator::new(&client, settings);
    let result = allocator.allocate(args.cloud_id, &args.name, &username, project_id);
    spinner.finish_and_clear();

    let vr_id = result?;
    println!(
        "{} Allocated virtualization realm '{}' with id {} and attached project '{}'",
        style("✓").green().bold(),
        args.name,
        vr_id,
        user.project_name
    );
    Ok(())
}

fn allocation_spinner(vr_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(format!("Waiting for realm '{}' to be allocated...", vr_name));
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

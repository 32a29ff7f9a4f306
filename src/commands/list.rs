//! List command implementation

use console::style;

use crate::cli::{ListArgs, ListTarget};
use crate::client::NamedItem;
use crate::commands::helpers::build_client;
use crate::error::Result;

/// Run list command
pub fn run(
    url: Option<&str>,
    config_path: Option<&std::path::Path>,
    project: Option<&str>,
    args: ListArgs,
) -> Result<()> {
    let client = build_client(url, config_path, project)?;

    let (label, items) = match args.target {
        ListTarget::Clouds => ("clouds", client.list_clouds()?),
        ListTarget::Projects => ("projects", client.list_projects()?),
        ListTarget::Teams => ("teams", client.list_teams()?),
        ListTarget::Scenarios => ("scenarios", client.list_scenarios()?),
        ListTarget::Deployments => ("deployments", client.list_deployments()?),
    };

    print_items(label, &items);
    Ok(())
}

fn print_items(label: &str, items: &[NamedItem]) {
    if items.is_empty() {
        println!("No {} found", label);
        return;
    }

    println!("{}", style(format!("{} ({}):", label, items.len())).bold());
    for item in items {
        println!("  {:>6}  {}", style(item.id).cyan(), item.name);
    }
}

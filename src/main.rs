//! Bart - CONS3RT asset and realm tool
//!
//! A command line tool for packaging and validating CONS3RT assets and for
//! managing virtualization realms on a CONS3RT site over its ReST API.

use clap::Parser;

mod asset;
mod cli;
mod client;
mod commands;
mod config;
mod error;
mod realm;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let url = cli.url.as_deref();
    let config_path = cli.config.as_deref();
    let project = cli.project.as_deref();

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Package(args) => commands::package::run(args),
        Commands::Import(args) => commands::import::run(url, config_path, project, args),
        Commands::UpdateAsset(args) => commands::update_asset::run(url, config_path, project, args),
        Commands::Allocate(args) => commands::allocate::run(url, config_path, project, args),
        Commands::Deallocate(args) => commands::deallocate::run(url, config_path, project, args),
        Commands::List(args) => commands::list::run(url, config_path, project, args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

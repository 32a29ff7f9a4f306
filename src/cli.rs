//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Bart - CONS3RT asset and realm tool
///
/// Package and validate CONS3RT assets, import them into a site, and drive
/// virtualization realm allocation and teardown over the ReST API.
#[derive(Parser, Debug)]
#[command(
    name = "bart",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "ReST client and CLI for the CONS3RT infrastructure platform",
    long_about = "Bart packages CONS3RT assets into importable zip archives, validates their \
                  directory structure, and manages virtualization realms (allocation, project \
                  attachment, teardown) on a CONS3RT site over its ReST API.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  bart validate ./my-asset\n    \
                  bart package ./my-asset\n    \
                  bart import asset-MyAsset.zip --url https://site.example.com\n    \
                  bart allocate --cloud-id 3 --name dev-realm --url https://site.example.com\n    \
                  bart list clouds --url https://site.example.com\n\n\
                  \x1b[1m\x1b[32mConfiguration:\x1b[0m\n    \
                  Credentials are read from ~/.bart/config.json (see 'bart config')."
)]
pub struct Cli {
    /// CONS3RT site base URL (e.g. https://site.example.com)
    #[arg(long, env = "BART_URL", global = true)]
    pub url: Option<String>,

    /// Config file to use instead of ~/.bart/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project whose ReST token to authenticate with
    #[arg(long, short = 'p', global = true)]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate an asset directory structure
    Validate(ValidateArgs),

    /// Package an asset directory into an importable zip
    Package(PackageArgs),

    /// Import an asset zip into the site
    Import(ImportArgs),

    /// Replace the content of an existing site asset
    UpdateAsset(UpdateAssetArgs),

    /// Allocate a virtualization realm in a cloud
    Allocate(AllocateArgs),

    /// Empty and deallocate a virtualization realm
    Deallocate(DeallocateArgs),

    /// List site resources
    List(ListArgs),

    /// Stage a config file into ~/.bart
    Config(ConfigArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Validate an asset directory:\n    bart validate ./my-asset")]
pub struct ValidateArgs {
    /// Asset directory to validate
    pub asset_dir: PathBuf,
}

/// Arguments for the package command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Package into the Downloads directory:\n    bart package ./my-asset\n\n\
                  Package into a specific directory:\n    bart package ./my-asset --dest ./out")]
pub struct PackageArgs {
    /// Asset directory to package
    pub asset_dir: PathBuf,

    /// Destination directory for the zip (defaults to the Downloads directory)
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

/// Arguments for the import command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Import an asset zip:\n    bart import asset-MyAsset.zip --url https://site.example.com")]
pub struct ImportArgs {
    /// Asset zip file to import
    pub zip_file: PathBuf,
}

/// Arguments for the update-asset command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Update asset 123 from a zip:\n    bart update-asset 123 asset-MyAsset.zip --url https://site.example.com")]
pub struct UpdateAssetArgs {
    /// Id of the site asset to update
    pub asset_id: u32,

    /// Asset zip file with the new content
    pub zip_file: PathBuf,
}

/// Arguments for the allocate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Allocate a realm:\n    bart allocate --cloud-id 3 --name dev-realm\n\n\
                  Allocate with a tighter poll budget:\n    bart allocate --cloud-id 3 --name dev-realm --retries 2 --queries 10 --interval 5")]
pub struct AllocateArgs {
    /// Id of the cloud to allocate in
    #[arg(long)]
    pub cloud_id: u32,

    /// Name of the virtualization realm to wait for
    #[arg(long)]
    pub name: String,

    /// Allocation requests to make before giving up
    #[arg(long, default_value_t = 5)]
    pub retries: u32,

    /// Realm-id queries per allocation request
    #[arg(long, default_value_t = 45)]
    pub queries: u32,

    /// Seconds to wait between queries
    #[arg(long, default_value_t = 20)]
    pub interval: u64,
}

/// Arguments for the deallocate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Deallocate a realm:\n    bart deallocate --cloud-id 3 --name dev-realm\n\n\
                  Deallocate without confirmation:\n    bart deallocate --cloud-id 3 --name dev-realm -y")]
pub struct DeallocateArgs {
    /// Id of the cloud the realm belongs to
    #[arg(long)]
    pub cloud_id: u32,

    /// Name of the virtualization realm to deallocate
    #[arg(long)]
    pub name: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Site resources that can be listed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Clouds,
    Projects,
    Teams,
    Scenarios,
    Deployments,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List clouds:\n    bart list clouds\n\n\
                  List projects:\n    bart list projects")]
pub struct ListArgs {
    /// Resource type to list
    #[arg(value_enum)]
    pub target: ListTarget,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Stage a config file:\n    bart config ./config.json\n\n\
                  Stage a config file and a client certificate:\n    bart config ./config.json --cert ./client.pem")]
pub struct ConfigArgs {
    /// Config file to copy into ~/.bart/config.json
    pub file: PathBuf,

    /// Client certificate to copy alongside the config
    #[arg(long)]
    pub cert: Option<PathBuf>,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    bart completions --shell bash > ~/.bash_completion.d/bart\n\n\
                  Generate zsh completions:\n    bart completions --shell zsh > ~/.zfunc/_bart\n\n\
                  Generate fish completions:\n    bart completions --shell fish > ~/.config/fish/completions/bart.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}

use super::common::PageArgs;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Refresh and maintain the package cache")]
    Index {
        #[command(subcommand)]
        command: IndexCommand,
    },

    #[command(about = "Query cached packages")]
    Package {
        #[command(subcommand)]
        command: PackageCommand,
    },

    #[command(about = "Write a default config and create an empty cache")]
    Init {
        #[arg(long, help = "Overwrite an existing config.toml")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum IndexCommand {
    #[command(about = "Refresh from the installed-package listing (tabular output)")]
    Refresh,

    #[command(about = "Refresh from the full catalog search (JSON output)")]
    Update,

    #[command(about = "Optimize database by reclaiming unused space")]
    Vacuum,
}

#[derive(Subcommand)]
pub enum PackageCommand {
    #[command(about = "List cached packages with optional filters")]
    List {
        /// Substring matched against name or identifier
        #[arg(long, default_value = "")]
        query: String,

        /// Substring matched against the identifier
        #[arg(long, default_value = "")]
        publisher: String,

        #[command(flatten)]
        page: PageArgs,
    },

    #[command(about = "List packages published by Microsoft")]
    Microsoft {
        #[command(flatten)]
        page: PageArgs,
    },

    #[command(about = "Show one cached package")]
    Show {
        /// Package identifier, e.g. Microsoft.Edge
        package_id: String,
    },
}

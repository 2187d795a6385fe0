// NOTE: Command Organization
//
// Subcommands are namespaced: `index` for everything that writes the cache,
// `package` for reads. `init` sits at the top level.

mod commands;
mod common;
mod enums;

pub use commands::*;
pub use common::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "pkgcache")]
#[command(about = "Refresh and query a local cache of package-manager listings", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to $PKGCACHE_PATH, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

use super::args::{Cli, Commands, IndexCommand, PackageCommand};
use super::handlers;
use crate::context::ExecutionContext;
use crate::presentation::ConsoleView;
use anyhow::Result;
use pkgcache_runtime::RefreshKind;

pub fn run(cli: Cli) -> Result<()> {
    let ctx = ExecutionContext::new(cli.data_dir.as_deref())?;
    let view = ConsoleView::new(cli.format);

    match cli.command {
        Commands::Init { force } => handlers::init::handle(&ctx, force, &view),

        Commands::Index { command } => match command {
            IndexCommand::Refresh => handlers::index::refresh(&ctx, RefreshKind::List, &view),
            IndexCommand::Update => {
                handlers::index::refresh(&ctx, RefreshKind::FullUpdate, &view)
            }
            IndexCommand::Vacuum => handlers::index::vacuum(&ctx, &view),
        },

        Commands::Package { command } => match command {
            PackageCommand::List {
                query,
                publisher,
                page,
            } => handlers::package::list(&ctx, query, publisher, page, &view),
            PackageCommand::Microsoft { page } => handlers::package::microsoft(&ctx, page, &view),
            PackageCommand::Show { package_id } => {
                handlers::package::show(&ctx, &package_id, &view)
            }
        },
    }
}

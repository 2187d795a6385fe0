use crate::context::ExecutionContext;
use crate::presentation::renderers::PackageView;
use crate::presentation::view_models::InitViewModel;
use anyhow::Result;
use pkgcache_runtime::InitService;

pub fn handle(ctx: &ExecutionContext, force: bool, view: &dyn PackageView) -> Result<()> {
    let report = InitService::run(ctx.paths(), force)?;

    view.render_init(&InitViewModel {
        success: true,
        config_path: report.config_path,
        db_path: report.db_path,
        config_written: report.config_written,
    })
}

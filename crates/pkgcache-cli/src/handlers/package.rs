use crate::args::PageArgs;
use crate::context::ExecutionContext;
use crate::presentation::renderers::PackageView;
use anyhow::Result;
use pkgcache_runtime::QueryService;
use pkgcache_types::PackageQuery;

pub fn list(
    ctx: &ExecutionContext,
    query: String,
    publisher: String,
    page: PageArgs,
    view: &dyn PackageView,
) -> Result<()> {
    let request = PackageQuery::new()
        .with_query(query)
        .with_publisher(publisher)
        .sorted_by(&page.sort)
        .with_page(page.page, page.page_size);

    let result = QueryService::new(ctx.db()?).run(&request)?;
    view.render_package_page(&result)
}

pub fn microsoft(ctx: &ExecutionContext, page: PageArgs, view: &dyn PackageView) -> Result<()> {
    let result = QueryService::new(ctx.db()?).microsoft(&page.sort, page.page, page.page_size)?;
    view.render_package_page(&result)
}

pub fn show(ctx: &ExecutionContext, package_id: &str, view: &dyn PackageView) -> Result<()> {
    let package = QueryService::new(ctx.db()?)
        .get(package_id)?
        .ok_or_else(|| anyhow::anyhow!("Package '{}' not found in cache", package_id))?;

    view.render_package(&package)
}

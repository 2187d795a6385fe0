use crate::presentation::view_models::{CommandResultViewModel, InitViewModel, RefreshEvent};
use anyhow::Result;
use pkgcache_runtime::RefreshReport;
use pkgcache_types::{PackagePage, StoredPackage};

pub trait PackageView {
    fn render_refresh_event(&self, event: RefreshEvent) -> Result<()>;
    fn render_refresh_report(&self, report: &RefreshReport) -> Result<()>;
    fn render_package_page(&self, page: &PackagePage) -> Result<()>;
    fn render_package(&self, package: &StoredPackage) -> Result<()>;
    fn render_init(&self, result: &InitViewModel) -> Result<()>;
    fn render_command_result(&self, result: &CommandResultViewModel) -> Result<()>;
    fn render_error(&self, error: &anyhow::Error);
}

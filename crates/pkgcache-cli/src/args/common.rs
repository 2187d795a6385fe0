use clap::Args;
use pkgcache_types::DEFAULT_PAGE_SIZE;

/// Sorting and paging shared by every listing command.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Sort column: name, package_id or version (anything else sorts by name)
    #[arg(long, default_value = "name")]
    pub sort: String,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page, clamped to 1..=100
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

pub mod init;
pub mod query;
pub mod refresh;

pub use init::{InitReport, InitService};
pub use query::QueryService;
pub use refresh::{PROGRESS_INTERVAL, RefreshKind, RefreshProgress, RefreshReport, RefreshService};

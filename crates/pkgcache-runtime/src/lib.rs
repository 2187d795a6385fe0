pub mod config;
pub mod error;
pub mod ops;
pub mod tool;

pub use config::{Config, StorePaths, ToolConfig, resolve_data_dir};
pub use error::{Error, Result};
pub use ops::{
    InitReport, InitService, QueryService, RefreshKind, RefreshProgress, RefreshReport,
    RefreshService,
};
pub use tool::{ToolError, ToolInvocation, ToolOutput};

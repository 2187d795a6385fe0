use serde::Serialize;
use std::path::PathBuf;

/// Progress of a refresh as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshEvent {
    ToolStarted { program: String, timeout_secs: u64 },
    RawCaptured { path: PathBuf },
    Parsed { records: usize },
    Stored { done: usize, total: usize },
    Completed { stored: usize, skipped: usize },
}

/// Generic `{success, message}` acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResultViewModel {
    pub success: bool,
    pub message: String,
}

impl CommandResultViewModel {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InitViewModel {
    pub success: bool,
    pub config_path: PathBuf,
    pub db_path: PathBuf,
    pub config_written: bool,
}

/// Failure envelope: `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorViewModel {
    pub success: bool,
    pub error: String,
}

impl ErrorViewModel {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

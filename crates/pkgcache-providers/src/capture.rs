use std::path::Path;

use crate::Result;

/// Write raw tool output verbatim to a side file, replacing the previous
/// capture. Parent directories are created as needed.
///
/// Called before parsing so that output which fails to parse can still be
/// inspected offline.
pub fn capture_raw(path: &Path, raw: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, raw)?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "captured raw output");
    Ok(())
}

use std::fmt;

use crate::tool::ToolError;

/// Result type for pkgcache-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Database/index layer error
    Index(pkgcache_index::Error),

    /// Parser layer error (side-file capture)
    Provider(pkgcache_providers::Error),

    /// External package-manager invocation failed
    Tool(ToolError),

    /// The tool ran but nothing could be imported from its output
    NoData { reason: String },

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Index(err) => write!(f, "Index error: {}", err),
            Error::Provider(err) => write!(f, "Provider error: {}", err),
            Error::Tool(err) => write!(f, "{}", err),
            Error::NoData { reason } => write!(f, "No packages parsed: {}", reason),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Index(err) => Some(err),
            Error::Provider(err) => Some(err),
            Error::Tool(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::NoData { .. } | Error::Config(_) => None,
        }
    }
}

impl From<pkgcache_index::Error> for Error {
    fn from(err: pkgcache_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<pkgcache_providers::Error> for Error {
    fn from(err: pkgcache_providers::Error) -> Self {
        Error::Provider(err)
    }
}

impl From<ToolError> for Error {
    fn from(err: ToolError) -> Self {
        Error::Tool(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

use std::fmt;

/// Result type for pkgcache-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the parser layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed (side-file capture)
    Io(std::io::Error),

    /// Tool output was expected to be JSON but did not parse
    MalformedJson(serde_json::Error),

    /// Tabular header does not name every required column
    ColumnDetection { missing: Vec<&'static str> },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::MalformedJson(err) => write!(f, "Malformed JSON output: {}", err),
            Error::ColumnDetection { missing } => write!(
                f,
                "Column detection failed: header is missing {}",
                missing.join(", ")
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::MalformedJson(err) => Some(err),
            Error::ColumnDetection { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedJson(err)
    }
}

use std::fmt;

/// Result type for pkgcache-index operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// SQLite rejected a statement against the package cache
    Database(rusqlite::Error),

    /// Creating the cache directory failed
    Io(std::io::Error),
}

impl Error {
    /// True when SQLite refused a write because of a table constraint,
    /// e.g. a second row for an existing `package_id`.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) if self.is_constraint_violation() => {
                write!(f, "Package cache rejected a row: {}", err)
            }
            Error::Database(err) => write!(f, "Package cache error: {}", err),
            Error::Io(err) => write!(f, "Cannot prepare package cache directory: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

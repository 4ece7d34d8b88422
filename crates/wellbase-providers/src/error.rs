use std::fmt;
use std::path::PathBuf;

/// Result type for wellbase-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the providers layer
#[derive(Debug)]
pub enum Error {
    /// Path does not exist
    NotFound(PathBuf),

    /// IO operation failed
    Io(std::io::Error),

    /// CSV header or stream could not be read
    Csv(csv::Error),

    /// Content is not in the expected format (LAS sections, etc.)
    Decode(String),

    /// Walkdir error
    WalkDir(walkdir::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Map an IO error for `path`, keeping not-found distinguishable.
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(path.into())
        } else {
            Error::Io(err)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(path) => write!(f, "Not found: {}", path.display()),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::NotFound(_) | Error::Decode(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let not_found = err
            .io_error()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound);
        match err.path() {
            Some(path) if not_found => Error::NotFound(path.to_path_buf()),
            _ => Error::WalkDir(err),
        }
    }
}

use std::fmt;
use std::path::PathBuf;

/// Result type for wellbase-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or folding a tree
#[derive(Debug)]
pub enum Error {
    /// File system or decoder failure
    Provider(wellbase_providers::Error),

    /// A file was read but could not be decoded
    File(PathBuf, wellbase_providers::Error),

    /// Node or file absent from the tree
    NotFound(String),

    /// Caller supplied malformed input
    InvalidInput(String),

    /// A file in a terminal group has no recognized stage suffix
    UnmatchedStage { file: String, suffix: String },

    /// A blocking decode task panicked or was cancelled
    Task(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Provider(err) => err.is_not_found(),
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Provider(err) => write!(f, "{}", err),
            Error::File(path, err) => write!(f, "{}: {}", path.display(), err),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::UnmatchedStage { file, suffix } => write!(
                f,
                "Unrecognized stage '{}' in {} (expected test, production or drilling)",
                suffix, file
            ),
            Error::Task(msg) => write!(f, "Decode task failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Provider(err) | Error::File(_, err) => Some(err),
            Error::NotFound(_)
            | Error::InvalidInput(_)
            | Error::UnmatchedStage { .. }
            | Error::Task(_) => None,
        }
    }
}

impl From<wellbase_providers::Error> for Error {
    fn from(err: wellbase_providers::Error) -> Self {
        Error::Provider(err)
    }
}

// Error types
pub mod error;

// File system access
pub mod fs;

// Decoders
pub mod las;
pub mod tabular;

pub use error::{Error, Result};
pub use fs::{FileSystem, LocalFileSystem};
pub use tabular::{CsvDecoder, DEFAULT_LABEL_FIELDS};

use crate::error::{Error, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Read-only access to a directory tree.
///
/// Implementations must report a missing path as [`Error::NotFound`] so that
/// callers can tell "absent" apart from "present but empty".
pub trait FileSystem: Send + Sync {
    /// Whether `path` is a directory. Fails if `path` does not exist. A
    /// symbolic link is never a directory, so walks cannot loop.
    fn is_dir(&self, path: &Path) -> Result<bool>;

    /// Entry names directly under `path`, in enumeration order.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>>;

    /// Full content of the file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// File content as text, replacing invalid UTF-8 sequences.
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self.read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn is_dir(&self, path: &Path) -> Result<bool> {
        let metadata = std::fs::symlink_metadata(path).map_err(|e| Error::from_io(e, path))?;
        Ok(metadata.is_dir())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        // No sort_by: entries come back in the order the OS enumerates them
        let mut names = Vec::new();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| Error::from_io(e, path))
    }
}

//! In-memory file system.
//!
//! Unlike a temp dir, directory listings come back in insertion order, which
//! lets tests pin down enumeration-order behavior.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use wellbase_providers::{Error, FileSystem, Result};

#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    dirs: HashMap<PathBuf, Vec<String>>,
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFileSystem {
    /// Create a file system containing the empty directory `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let mut fs = Self::default();
        fs.dirs.insert(root.into(), Vec::new());
        fs
    }

    /// Add a file at `path`, creating missing parent directories.
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        let path = path.as_ref().to_path_buf();
        self.register(&path);
        self.files.insert(path, contents.as_ref().to_vec());
        self
    }

    /// Add an (empty) directory at `path`.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        self.register(&path);
        self.dirs.entry(path).or_default();
        self
    }

    fn register(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        if !self.dirs.contains_key(parent) {
            self.register(parent);
            self.dirs.insert(parent.to_path_buf(), Vec::new());
        }
        let name = name.to_string_lossy().into_owned();
        let entries = self.dirs.entry(parent.to_path_buf()).or_default();
        if !entries.contains(&name) {
            entries.push(name);
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_dir(&self, path: &Path) -> Result<bool> {
        if self.dirs.contains_key(path) {
            Ok(true)
        } else if self.files.contains_key(path) {
            Ok(false)
        } else {
            Err(Error::NotFound(path.to_path_buf()))
        }
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_path_buf()))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_path_buf()))
    }
}

//! On-disk directory fixtures.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp-dir backed directory tree, built with a fluent interface.
///
/// # Example
/// ```no_run
/// use wellbase_testing::DataTree;
///
/// let tree = DataTree::new()
///     .file("heletz/north/W1-test.csv", "well,rate\nW1,80\n")
///     .dir("heletz/empty");
/// assert!(tree.path("heletz/north").is_dir());
/// ```
pub struct DataTree {
    temp_dir: TempDir,
}

impl Default for DataTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DataTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the fixture.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Write a file, creating parent directories as needed.
    pub fn file(self, relative: &str, contents: impl AsRef<[u8]>) -> Self {
        self.write(relative, contents)
            .expect("Failed to write fixture file");
        self
    }

    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path(relative)).expect("Failed to create fixture dir");
        self
    }

    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> Result<()> {
        let target = self.path(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, contents)?;
        Ok(())
    }
}

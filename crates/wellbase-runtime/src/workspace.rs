use crate::config::Config;
use crate::error::{Error, Result};
use crate::page::{PageData, PageLoader, PageRequest};
use log::{debug, info};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use wellbase_engine::{Aggregator, Found};
use wellbase_providers::{FileSystem, LocalFileSystem};
use wellbase_types::{Aggregate, Buckets, Record, StagedRow, Tree};

/// Minimum length of a file name accepted by [`Workspace::file`].
pub const MIN_FILE_NAME_LEN: usize = 10;

/// Rows of a file found by name, with its path relative to the files root's
/// parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileData {
    pub path: String,
    pub rows: Vec<Record>,
}

/// Entry point for every request. Each call builds its tree from scratch;
/// nothing is cached between calls.
pub struct Workspace {
    config: Config,
    fs: Arc<dyn FileSystem>,
}

impl Workspace {
    pub fn new(config: Config) -> Self {
        Self::with_file_system(config, Arc::new(LocalFileSystem))
    }

    pub fn with_file_system(config: Config, fs: Arc<dyn FileSystem>) -> Self {
        Self { config, fs }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tree of the whole reservoirs root.
    pub fn reservoir_tree(&self) -> Result<Tree> {
        Ok(wellbase_engine::build_tree(
            self.fs.as_ref(),
            &self.config.roots.reservoirs,
        )?)
    }

    /// Tree of one folder below the reservoirs root.
    pub fn field_tree(&self, folder: &str) -> Result<Tree> {
        let root = resolve_under(&self.config.roots.reservoirs, folder)?;
        Ok(wellbase_engine::build_tree(self.fs.as_ref(), &root)?)
    }

    /// Locate a node by name in the reservoirs tree.
    pub fn find(&self, name: &str) -> Result<(Tree, Found)> {
        let tree = self.reservoir_tree()?;
        match wellbase_engine::find_by_name(&tree, name) {
            Some(found) => Ok((tree, found)),
            None => Err(Error::NotFound(format!("'{}' is not in the reservoir tree", name))),
        }
    }

    /// Stage buckets of every CSV group below `folder`.
    pub async fn scan_field(&self, folder: &str) -> Result<Aggregate> {
        let tree = self.field_tree(folder)?;
        let aggregator = Aggregator::new(Arc::clone(&self.fs), self.config.decoder())
            .unmatched_stage(self.config.aggregate.unmatched_stage);

        let result = aggregator.aggregate_tree(&tree).await?;
        info!(
            "Aggregated {} ({} groups)",
            tree.base().display(),
            result.groups().len()
        );
        Ok(result)
    }

    /// Raw rows of one CSV file below the reservoirs root.
    pub fn wells(&self, path: &str) -> Result<Vec<Record>> {
        let location = resolve_under(&self.config.roots.reservoirs, path)?;
        let bytes = self.fs.read(&location)?;
        Ok(self.config.decoder().decode(&bytes)?)
    }

    /// Numeric rows of the first file named `name` below the files root.
    pub fn file(&self, name: &str) -> Result<FileData> {
        if name.chars().count() < MIN_FILE_NAME_LEN {
            return Err(Error::InvalidInput(format!(
                "file name must be at least {} characters",
                MIN_FILE_NAME_LEN
            )));
        }

        let tree = wellbase_engine::build_tree(self.fs.as_ref(), &self.config.roots.files)?;
        let found = wellbase_engine::find_by_name(&tree, name)
            .ok_or_else(|| Error::NotFound(format!("'{}' is not in the file structure", name)))?;
        if !tree.node(found.node).is_file() {
            return Err(Error::InvalidInput(format!("'{}' is not a file", name)));
        }

        let path = wellbase_engine::path_string(found.segments.as_slice())?;
        let location = wellbase_engine::locate(&tree, found.node);
        debug!("Reading {} from {}", path, location.display());

        let bytes = self.fs.read(&location)?;
        let rows = self.config.decoder().decode_numeric(&bytes)?;
        Ok(FileData { path, rows })
    }

    /// Enrich the tree below `folder` and flatten its rows by stage.
    pub fn stages(&self, folder: &str) -> Result<Buckets<StagedRow>> {
        let mut tree = self.field_tree(folder)?;
        let grafted = wellbase_engine::enrich(&mut tree, self.fs.as_ref(), &self.config.decoder())?;
        debug!("Grafted {} rows below {}", grafted, tree.base().display());
        Ok(wellbase_engine::flatten_by_stage(&tree))
    }

    /// Per-well datasets from the data root.
    pub fn page_data(&self, request: &PageRequest) -> Result<PageData> {
        PageLoader::new(self.fs.as_ref(), &self.config).load(request)
    }
}

/// Join a caller-supplied relative path onto `root`, refusing anything that
/// would leave it. A leading `/` is accepted and ignored.
pub fn resolve_under(root: &Path, relative: &str) -> Result<PathBuf> {
    let trimmed = relative.trim_start_matches('/');
    let mut resolved = root.to_path_buf();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => {
                return Err(Error::InvalidInput(format!(
                    "'{}' must stay inside {}",
                    relative,
                    root.display()
                )));
            }
        }
    }
    Ok(resolved)
}

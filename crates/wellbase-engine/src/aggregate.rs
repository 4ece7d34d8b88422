use crate::error::{Error, Result};
use futures::future::{BoxFuture, FutureExt, try_join_all};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wellbase_providers::{CsvDecoder, FileSystem};
use wellbase_types::{Aggregate, BucketResult, NodeId, Record, Stage, Tree, stage_suffix};

/// What to do with a file in a terminal group whose name carries no
/// recognized stage suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedStage {
    /// Leave the file out and log a warning.
    #[default]
    Skip,
    /// Fail the whole aggregation.
    Fail,
}

/// Folds CSV leaves of a tree into stage buckets.
///
/// A directory whose first child is a `.csv` file is a terminal group: all of
/// its files are decoded concurrently and their rows appended to the bucket of
/// each file's stage, in child order. Any other directory collects the
/// non-empty results of its children.
#[derive(Clone)]
pub struct Aggregator {
    fs: Arc<dyn FileSystem>,
    decoder: CsvDecoder,
    unmatched: UnmatchedStage,
}

impl Aggregator {
    pub fn new(fs: Arc<dyn FileSystem>, decoder: CsvDecoder) -> Self {
        Self {
            fs,
            decoder,
            unmatched: UnmatchedStage::default(),
        }
    }

    pub fn unmatched_stage(mut self, policy: UnmatchedStage) -> Self {
        self.unmatched = policy;
        self
    }

    /// Aggregate the whole tree from its base directory, normalized for
    /// callers: a single-element forest is unwrapped.
    pub async fn aggregate_tree(&self, tree: &Tree) -> Result<Aggregate> {
        let result = self
            .aggregate(tree, tree.root(), tree.base().to_path_buf())
            .await?;
        Ok(result.normalize())
    }

    /// Aggregate the subtree at `node`, whose files live under `logical_path`.
    pub fn aggregate<'a>(
        &'a self,
        tree: &'a Tree,
        node: NodeId,
        logical_path: PathBuf,
    ) -> BoxFuture<'a, Result<Aggregate>> {
        async move {
            let children = tree.children(node);
            let Some(&first) = children.first() else {
                return Ok(Aggregate::Empty);
            };

            if tree.node(first).name.ends_with(".csv") {
                let buckets = self.fold_group(tree, node, &logical_path).await?;
                return Ok(Aggregate::Group(buckets));
            }

            let results = try_join_all(children.iter().map(|&child| {
                let child_path = logical_path.join(&tree.node(child).name);
                self.aggregate(tree, child, child_path)
            }))
            .await?;

            let results: Vec<Aggregate> = results.into_iter().filter(|r| !r.is_empty()).collect();
            if results.is_empty() {
                Ok(Aggregate::Empty)
            } else {
                Ok(Aggregate::Forest(results))
            }
        }
        .boxed()
    }

    async fn fold_group(&self, tree: &Tree, node: NodeId, dir: &Path) -> Result<BucketResult> {
        let mut tasks = Vec::new();

        for &child in tree.children(node) {
            let entry = tree.node(child);
            if !entry.is_file() {
                debug!("Skipping non-file {} in group {}", entry.name, dir.display());
                continue;
            }

            let Some(stage) = Stage::from_file_name(&entry.name) else {
                let suffix = stage_suffix(&entry.name).to_string();
                match self.unmatched {
                    UnmatchedStage::Skip => {
                        warn!(
                            "Skipping {} in {}: unrecognized stage '{}'",
                            entry.name,
                            dir.display(),
                            suffix
                        );
                        continue;
                    }
                    UnmatchedStage::Fail => {
                        return Err(Error::UnmatchedStage {
                            file: entry.name.clone(),
                            suffix,
                        });
                    }
                }
            };

            let path = dir.join(&entry.name);
            tasks.push(self.decode_file(path, stage));
        }

        debug!("Decoding {} files in group {}", tasks.len(), dir.display());
        let decoded = try_join_all(tasks).await?;

        let mut buckets = BucketResult::new();
        for (stage, rows) in decoded {
            buckets.extend(stage, rows);
        }
        Ok(buckets)
    }

    async fn decode_file(&self, path: PathBuf, stage: Stage) -> Result<(Stage, Vec<Record>)> {
        let fs = Arc::clone(&self.fs);
        let decoder = self.decoder.clone();

        let rows = tokio::task::spawn_blocking(move || -> Result<Vec<Record>> {
            let bytes = fs.read(&path)?;
            decoder
                .decode_numeric(&bytes)
                .map_err(|err| Error::File(path, err))
        })
        .await
        .map_err(|err| Error::Task(err.to_string()))??;

        Ok((stage, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_tree;
    use wellbase_testing::MemoryFileSystem;
    use wellbase_testing::samples::{DRILLING_CSV, PRODUCTION_CSV, TEST_CSV};
    use wellbase_types::Value;

    fn aggregator(fs: MemoryFileSystem) -> Aggregator {
        Aggregator::new(Arc::new(fs), CsvDecoder::default())
    }

    #[tokio::test]
    async fn test_terminal_group_buckets_by_stage() -> Result<()> {
        let fs = MemoryFileSystem::new("/f")
            .with_file("/f/W1-production.csv", PRODUCTION_CSV)
            .with_file("/f/W1-test.csv", TEST_CSV);
        let tree = build_tree(&fs, Path::new("/f"))?;

        let result = aggregator(fs).aggregate_tree(&tree).await?;
        let Aggregate::Group(buckets) = result else {
            panic!("expected a group, got {:?}", result);
        };

        assert_eq!(buckets.production.len(), 2);
        assert_eq!(buckets.test.len(), 1);
        assert!(buckets.drilling.is_empty());
        assert_eq!(buckets.production[0].get("oil"), Some(&Value::Float(120.5)));
        assert_eq!(buckets.production[1].get("month"), Some(&Value::from("Feb")));
        Ok(())
    }

    #[tokio::test]
    async fn test_rows_keep_file_then_child_order() -> Result<()> {
        let fs = MemoryFileSystem::new("/f")
            .with_file("/f/W2-drilling.csv", "well,depth\nW2,1\nW2,2\n")
            .with_file("/f/W1-drilling.csv", DRILLING_CSV);
        let tree = build_tree(&fs, Path::new("/f"))?;

        let result = aggregator(fs).aggregate_tree(&tree).await?;
        let groups = result.groups();
        let wells: Vec<&str> = groups[0]
            .drilling
            .iter()
            .filter_map(|r| r.get_str("well"))
            .collect();
        assert_eq!(wells, vec!["W2", "W2", "W1", "W1"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_single_subgroup_is_unwrapped() -> Result<()> {
        let fs = MemoryFileSystem::new("/field")
            .with_file("/field/north/W1-test.csv", TEST_CSV);
        let tree = build_tree(&fs, Path::new("/field"))?;
        let agg = aggregator(fs);

        let raw = agg
            .aggregate(&tree, tree.root(), tree.base().to_path_buf())
            .await?;
        assert!(matches!(&raw, Aggregate::Forest(items) if items.len() == 1));

        let normalized = agg.aggregate_tree(&tree).await?;
        assert!(matches!(normalized, Aggregate::Group(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_nested_forest_drops_empty_directories() -> Result<()> {
        let fs = MemoryFileSystem::new("/field")
            .with_file("/field/north/W1-test.csv", TEST_CSV)
            .with_dir("/field/empty")
            .with_file("/field/south/deep/W2-production.csv", PRODUCTION_CSV);
        let tree = build_tree(&fs, Path::new("/field"))?;

        let result = aggregator(fs).aggregate_tree(&tree).await?;
        let Aggregate::Forest(items) = &result else {
            panic!("expected a forest, got {:?}", result);
        };
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Aggregate::Group(_)));
        assert!(matches!(&items[1], Aggregate::Forest(inner) if inner.len() == 1));
        Ok(())
    }

    #[tokio::test]
    async fn test_leaf_only_tree_is_empty() -> Result<()> {
        let fs = MemoryFileSystem::new("/field").with_dir("/field/a").with_dir("/field/b");
        let tree = build_tree(&fs, Path::new("/field"))?;

        let result = aggregator(fs).aggregate_tree(&tree).await?;
        assert_eq!(result, Aggregate::Empty);
        assert_eq!(serde_json::to_string(&result).unwrap(), "null");
        Ok(())
    }

    #[tokio::test]
    async fn test_unmatched_stage_policy() -> Result<()> {
        let fs = MemoryFileSystem::new("/f")
            .with_file("/f/W1-test.csv", TEST_CSV)
            .with_file("/f/W1-injection.csv", "well,rate\nW1,5\n");
        let tree = build_tree(&fs, Path::new("/f"))?;
        let agg = aggregator(fs);

        let skipped = agg.aggregate_tree(&tree).await?;
        assert_eq!(skipped.groups()[0].len(), 1);

        let err = agg
            .clone()
            .unmatched_stage(UnmatchedStage::Fail)
            .aggregate_tree(&tree)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnmatchedStage { ref suffix, .. } if suffix == "injection"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_file_fails_group() -> Result<()> {
        let fs = MemoryFileSystem::new("/f").with_file("/f/W1-test.csv", TEST_CSV);
        let tree = build_tree(&fs, Path::new("/f"))?;

        // File disappears between build and aggregation
        let agg = aggregator(MemoryFileSystem::new("/f"));
        let err = agg.aggregate_tree(&tree).await.unwrap_err();
        assert!(err.is_not_found());
        Ok(())
    }
}

use std::sync::Arc;
use wellbase_engine::{Aggregator, build_tree, enrich, find_by_name, flatten_by_stage, locate};
use wellbase_providers::{CsvDecoder, FileSystem, LocalFileSystem};
use wellbase_testing::DataTree;
use wellbase_testing::samples::{DRILLING_CSV, PRODUCTION_CSV, TEST_CSV};
use wellbase_types::{Aggregate, NodeKind, Value};

fn heletz() -> DataTree {
    DataTree::new()
        .file("heletz/north/W1-production.csv", PRODUCTION_CSV)
        .file("heletz/north/W1-test.csv", TEST_CSV)
        .file("heletz/north/W1-drilling.csv", DRILLING_CSV)
}

#[test]
fn build_tree_matches_directory_listing() -> anyhow::Result<()> {
    let data = heletz().dir("heletz/south");
    let root = data.path("heletz");

    let tree = build_tree(&LocalFileSystem, &root)?;
    let listed = LocalFileSystem.list_dir(&root)?;
    let names: Vec<String> = tree
        .children(tree.root())
        .iter()
        .map(|&id| tree.node(id).name.clone())
        .collect();

    assert_eq!(names, listed);
    assert_eq!(tree.node(tree.root()).kind, NodeKind::Directory);
    Ok(())
}

#[test]
fn find_locates_file_on_disk() -> anyhow::Result<()> {
    let data = heletz();
    let tree = build_tree(&LocalFileSystem, &data.path("heletz"))?;

    let found = find_by_name(&tree, "W1-test.csv").expect("file should be indexed");
    assert_eq!(found.segments, vec!["heletz", "north", "W1-test.csv"]);
    assert!(locate(&tree, found.node).is_file());
    Ok(())
}

#[tokio::test]
async fn aggregate_single_field_returns_bare_buckets() -> anyhow::Result<()> {
    let data = heletz();
    let tree = build_tree(&LocalFileSystem, &data.path("heletz"))?;

    let aggregator = Aggregator::new(Arc::new(LocalFileSystem), CsvDecoder::default());
    let result = aggregator.aggregate_tree(&tree).await?;

    let Aggregate::Group(buckets) = result else {
        panic!("expected bare buckets, got {:?}", result);
    };
    assert_eq!(buckets.production.len(), 2);
    assert_eq!(buckets.test.len(), 1);
    assert_eq!(buckets.drilling.len(), 2);
    assert_eq!(buckets.test[0].get("pressure"), Some(&Value::Float(2100.5)));
    Ok(())
}

#[test]
fn build_missing_root_is_not_found() {
    let data = DataTree::new();
    let err = build_tree(&LocalFileSystem, &data.path("absent")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn enrich_then_flatten_carries_provenance() -> anyhow::Result<()> {
    let data = heletz();
    let mut tree = build_tree(&LocalFileSystem, &data.path("heletz"))?;

    let grafted = enrich(&mut tree, &LocalFileSystem, &CsvDecoder::default())?;
    assert_eq!(grafted, 5);

    let flat = flatten_by_stage(&tree);
    assert_eq!(flat.counts().map(|(_, n)| n), [1, 2, 2]);
    assert!(flat.drilling.iter().all(|row| row.path == "/north/W1-drilling.csv"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn build_keeps_symlink_loops_as_leaves() -> anyhow::Result<()> {
    let data = DataTree::new().file("field/W1-test.csv", TEST_CSV);
    std::os::unix::fs::symlink(data.root(), data.path("field/loop"))?;

    let tree = build_tree(&LocalFileSystem, data.root())?;
    let found = find_by_name(&tree, "loop").expect("link should be indexed");
    assert_eq!(tree.node(found.node).kind, NodeKind::File);
    assert!(tree.children(found.node).is_empty());
    assert_eq!(tree.len(), 4);
    Ok(())
}
